/// Navigation lambdas paired with the include path they resolve to.
pub fn supported_lambdas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("x => x.Foo", "Foo"),
        ("x => x.Foo.Bar.Baz", "Foo.Bar.Baz"),
        ("x => x.Foo.Select(y => y.Bar)", "Foo.Bar"),
        ("x => x.Foo.Select(y => y.Bar.Baz)", "Foo.Bar.Baz"),
        (
            "customer => customer.Orders.Select(order => order.Lines.Select(line => line.Product))",
            "Orders.Lines.Product",
        ),
        ("x => x.Orders.Take(10)", "Orders"),
        ("x => x.Orders.Where(o => o.Lines)", "Orders.Lines"),
        ("(x) => x.Address", "Address"),
    ]
}

/// Lambdas whose body cannot name a navigation path.
pub fn unsupported_lambdas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("x => x.Count() > 0", "Boolean"),
        ("x => x", "Parameter"),
        ("x => 42", "Number"),
        ("x => 'Orders'", "String"),
        ("x => !x.Active", "Boolean"),
    ]
}
