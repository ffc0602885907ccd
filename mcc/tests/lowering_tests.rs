use mcc_lang::{
    commands::ScoreboardComparison,
    common::{Config, Span},
    error::{InternalError, LangErrorKind, LowerError},
    scoreboard::{
        Attribute, Literal, Operation, ScoreboardValue, StructDefinition, StructField, Typedef,
    },
    Compilation,
};
use pretty_assertions::assert_eq;

mod common;
pub use common::*;

fn decimal(text: &str) -> Literal {
    Literal::Decimal(text.parse().unwrap())
}

fn decimal_type(precision: u8) -> Typedef {
    Typedef::Decimal { precision }
}

/// Declares the values, then returns the compilation with a fresh machine
fn setup(values: &[(&str, Typedef)]) -> (Compilation, Vec<ScoreboardValue>) {
    let mut compilation = Compilation::new(Config::default());
    let values = values
        .iter()
        .map(|(alias, typedef)| compilation.declare(alias, typedef.clone(), Vec::new()))
        .collect();
    (compilation, values)
}

#[test]
fn test_integer_literal_round_trip() {
    let (compilation, values) = setup(&[("x", Typedef::Integer)]);
    let manager = &compilation.scoreboard;
    let mut machine = Machine::from_manager(manager);

    for n in [0, 7, -13, i32::MAX, i32::MIN] {
        machine.apply(manager, values[0].commands_set_literal(&Literal::Integer(n)));
        assert_eq!(machine.local("x"), n);
    }
}

#[test]
fn test_decimal_literal_round_trip() {
    let (compilation, values) = setup(&[("d", decimal_type(2))]);
    let manager = &compilation.scoreboard;
    let d = &values[0];
    let mut machine = Machine::from_manager(manager);

    let cases = [
        (decimal("1.50"), (1, 50)),
        (decimal("-0.05"), (0, -5)),
        (decimal("-12.34"), (-12, -34)),
        (decimal("0.125"), (0, 12)),
        (decimal("-7.1"), (-7, -10)),
        (Literal::Integer(3), (3, 0)),
        (Literal::Null, (0, 0)),
    ];
    for (literal, expected) in cases {
        machine.apply(manager, d.commands_set_literal(&literal));
        assert_eq!(machine.decimal(d), expected, "{literal}");
    }
}

#[test]
fn test_addition_keeps_signs_consistent() {
    let (compilation, values) = setup(&[
        ("x", decimal_type(2)),
        ("y", decimal_type(2)),
        ("i", Typedef::Integer),
    ]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (x, y, i) = (&values[0], &values[1], &values[2]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, x.commands_set_literal(&Literal::Integer(3)));
    machine.apply(manager, y.commands_set_literal(&decimal("-1.50")));
    machine.apply(manager, x.commands_add(y, &lowering));
    assert_eq!(machine.decimal(x), (1, 50));

    machine.apply(manager, x.commands_set_literal(&decimal("-1.50")));
    machine.apply(manager, i.commands_set_literal(&Literal::Integer(1)));
    machine.apply(manager, x.commands_add(i, &lowering));
    assert_eq!(machine.decimal(x), (0, -50));

    machine.apply(manager, x.commands_set_literal(&decimal("0.25")));
    machine.apply(manager, y.commands_set_literal(&decimal("1.00")));
    machine.apply(manager, x.commands_sub(y, &lowering));
    assert_eq!(machine.decimal(x), (0, -75));

    machine.apply(manager, x.commands_sub(y, &lowering));
    assert_eq!(machine.decimal(x), (-1, -75));
    assert_eq!(manager.routines().len(), 1);
}

#[test]
fn test_precision_balancing() {
    let (compilation, values) = setup(&[("low", decimal_type(2)), ("high", decimal_type(4))]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (low, high) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    // The more precise operand is scaled down by 10^2
    machine.apply(manager, low.commands_set_literal(&decimal("1.00")));
    machine.apply(manager, high.commands_set_literal(&decimal("0.1234")));
    machine.apply(manager, low.commands_add(high, &lowering));
    assert_eq!(machine.decimal(low), (1, 12));

    // The less precise operand is scaled up
    machine.apply(manager, low.commands_set_literal(&decimal("2.50")));
    machine.apply(manager, high.commands_set_literal(&Literal::Integer(0)));
    machine.apply(manager, high.commands_add(low, &lowering));
    assert_eq!(machine.decimal(high), (2, 5000));

    // Dropped digits are truncated toward zero
    machine.apply(manager, high.commands_set_literal(&decimal("-0.9950")));
    machine.apply(manager, low.commands_set(high, &lowering));
    assert_eq!(machine.decimal(low), (0, -99));

    machine.apply(manager, high.commands_set_literal(&decimal("-0.1250")));
    machine.apply(manager, low.commands_set(high, &lowering));
    assert_eq!(machine.decimal(low), (0, -12));
    machine.apply(manager, low.commands_set_literal(&decimal("-0.125")));
    assert_eq!(machine.decimal(low), (0, -12));

    machine.apply(manager, high.commands_set_literal(&decimal("3.1415")));
    machine.apply(manager, low.commands_set(high, &lowering));
    assert_eq!(machine.decimal(low), (3, 14));
}

#[test]
fn test_swap_with_different_precision() {
    let (compilation, values) = setup(&[("a", decimal_type(2)), ("b", decimal_type(3))]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (a, b) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, a.commands_set_literal(&decimal("1.25")));
    machine.apply(manager, b.commands_set_literal(&decimal("-2.505")));
    machine.apply(manager, a.commands_swap(b, &lowering));

    assert_eq!(machine.decimal(a), (-2, -50));
    assert_eq!(machine.decimal(b), (1, 250));
}

#[test]
fn test_decimal_multiplication() {
    let (compilation, values) = setup(&[("x", decimal_type(2)), ("y", decimal_type(2))]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (x, y) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, x.commands_set_literal(&decimal("1.50")));
    machine.apply(manager, y.commands_set_literal(&decimal("2.25")));
    machine.apply(manager, x.commands_mul(y, &lowering));
    assert_eq!(machine.decimal(x), (3, 37));

    machine.apply(manager, y.commands_set_literal(&decimal("-2.00")));
    machine.apply(manager, x.commands_mul(y, &lowering));
    assert_eq!(machine.decimal(x), (-6, -74));

    assert!(matches!(
        x.commands_div(y, &lowering),
        Err(LowerError::Lang(LangErrorKind::UnsupportedOperation { .. }))
    ));
    assert!(matches!(
        x.commands_mod(y, &lowering),
        Err(LowerError::Lang(LangErrorKind::UnsupportedOperation { .. }))
    ));
}

#[test]
fn test_decimal_with_integer() {
    let (compilation, values) = setup(&[("x", decimal_type(2)), ("i", Typedef::Integer)]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (x, i) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, x.commands_set_literal(&decimal("7.50")));
    machine.apply(manager, i.commands_set_literal(&Literal::Integer(2)));
    machine.apply(manager, x.commands_mul(i, &lowering));
    assert_eq!(machine.decimal(x), (15, 0));

    machine.apply(manager, i.commands_set_literal(&Literal::Integer(4)));
    machine.apply(manager, x.commands_div(i, &lowering));
    assert_eq!(machine.decimal(x), (3, 75));

    machine.apply(manager, i.commands_set_literal(&Literal::Integer(2)));
    machine.apply(manager, x.commands_mod(i, &lowering));
    assert_eq!(machine.decimal(x), (1, 75));

    machine.apply(manager, x.commands_set_literal(&decimal("-7.50")));
    machine.apply(manager, x.commands_div(i, &lowering));
    assert_eq!(machine.decimal(x), (-3, -75));

    machine.apply(manager, x.commands_set_literal(&decimal("-1.50")));
    machine.apply(manager, i.commands_set_literal(&Literal::Integer(3)));
    machine.apply(manager, x.commands_mul(i, &lowering));
    assert_eq!(machine.decimal(x), (-4, -50));

    machine.apply(manager, i.commands_set_literal(&Literal::Integer(9)));
    machine.apply(manager, x.commands_set(i, &lowering));
    assert_eq!(machine.decimal(x), (9, 0));

    machine.apply(manager, x.commands_set_literal(&decimal("-1.00")));
    machine.apply(manager, i.commands_set_literal(&Literal::Integer(3)));
    machine.apply(manager, x.commands_div(i, &lowering));
    assert_eq!(machine.decimal(x), (0, -33));
}

#[test]
fn test_integer_with_decimal() {
    let (compilation, values) = setup(&[("i", Typedef::Integer), ("d", decimal_type(2))]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (i, d) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, i.commands_set_literal(&Literal::Integer(5)));
    machine.apply(manager, d.commands_set_literal(&decimal("1.50")));

    let steps = [
        (Operation::Add, 6),
        (Operation::Sub, 4),
        (Operation::Mul, 6),
        (Operation::Div, 4),
        (Operation::Mod, 1),
        (Operation::Set, 1),
    ];
    for (operation, expected) in steps {
        machine.apply(manager, i.commands_operation(operation, d, &lowering));
        assert_eq!(machine.local("i"), expected, "{operation}");
    }

    machine.apply(manager, i.commands_set_literal(&Literal::Integer(9)));
    machine.apply(manager, i.commands_swap(d, &lowering));
    assert_eq!(machine.local("i"), 1);
    assert_eq!(machine.decimal(d), (9, 0));
}

#[test]
fn test_integer_with_negative_decimal() {
    let (compilation, values) = setup(&[("i", Typedef::Integer), ("d", decimal_type(2))]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (i, d) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    // Every result is truncated toward zero, the same way assignment is
    let cases = [
        (5, "-6.50", Operation::Add, -1),
        (0, "-1.50", Operation::Set, -1),
        (-7, "2.00", Operation::Div, -3),
        (-7, "2.50", Operation::Div, -2),
        (3, "-1.50", Operation::Mul, -4),
        (-5, "1.50", Operation::Mod, 1),
        (2, "3.75", Operation::Sub, -1),
        (7, "0.00", Operation::Div, 7),
    ];
    for (start, operand, operation, expected) in cases {
        machine.apply(manager, i.commands_set_literal(&Literal::Integer(start)));
        machine.apply(manager, d.commands_set_literal(&decimal(operand)));
        machine.apply(manager, i.commands_operation(operation, d, &lowering));
        assert_eq!(machine.local("i"), expected, "{start} {operation} {operand}");
    }
}

#[test]
fn test_decimal_multiplication_range() {
    let (compilation, values) = setup(&[
        ("x", decimal_type(4)),
        ("y", decimal_type(4)),
        ("big", decimal_type(2)),
        ("small", decimal_type(2)),
        ("fine", decimal_type(5)),
    ]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (x, y) = (&values[0], &values[1]);
    let (big, small, fine) = (&values[2], &values[3], &values[4]);
    let mut machine = Machine::from_manager(manager);

    let cases = [
        ("5.0000", "5.0000", (25, 0)),
        ("123.4567", "-89.1234", (-11002, -8808)),
        ("-0.0001", "0.5000", (0, 0)),
        ("-0.0300", "-0.0300", (0, 9)),
    ];
    for (lhs, rhs, expected) in cases {
        machine.apply(manager, x.commands_set_literal(&decimal(lhs)));
        machine.apply(manager, y.commands_set_literal(&decimal(rhs)));
        machine.apply(manager, x.commands_mul(y, &lowering));
        assert_eq!(machine.decimal(x), expected, "{lhs} * {rhs}");
    }

    machine.apply(manager, x.commands_set_literal(&decimal("-1.5000")));
    machine.apply(manager, x.commands_mul(x, &lowering));
    assert_eq!(machine.decimal(x), (2, 2500));

    machine.apply(manager, big.commands_set_literal(&decimal("300000.00")));
    machine.apply(manager, small.commands_set_literal(&decimal("2.50")));
    machine.apply(manager, big.commands_mul(small, &lowering));
    assert_eq!(machine.decimal(big), (750_000, 0));

    assert!(matches!(
        fine.commands_mul(fine, &lowering),
        Err(LowerError::Lang(LangErrorKind::UnsupportedOperation { .. }))
    ));
    assert_eq!(manager.temps.depth(&Typedef::Integer, false), 0);
}

#[test]
fn test_literal_operations() {
    let (compilation, values) = setup(&[("i", Typedef::Integer), ("d", decimal_type(2))]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (i, d) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, i.commands_set_literal(&Literal::Integer(10)));
    assert_eq!(
        i.commands_operation_literal(Operation::Add, &Literal::Integer(5), &lowering),
        Ok(vec!["scoreboard players add @s i 5".to_string()])
    );

    let steps = [
        (Operation::Add, 5, 15),
        (Operation::Sub, 3, 12),
        (Operation::Mul, 3, 36),
        (Operation::Div, -5, -8),
        (Operation::Mod, 5, 2),
    ];
    for (operation, operand, expected) in steps {
        machine.apply(
            manager,
            i.commands_operation_literal(operation, &Literal::Integer(operand), &lowering),
        );
        assert_eq!(machine.local("i"), expected, "{operation}");
    }

    machine.apply(manager, d.commands_set_literal(&decimal("1.00")));
    let steps = [
        (Operation::Add, decimal("0.25"), (1, 25)),
        (Operation::Mul, Literal::Integer(3), (3, 75)),
        (Operation::Sub, Literal::Integer(4), (0, -25)),
    ];
    for (operation, literal, expected) in steps {
        machine.apply(
            manager,
            d.commands_operation_literal(operation, &literal, &lowering),
        );
        assert_eq!(machine.decimal(d), expected, "{operation} {literal}");
    }

    assert!(matches!(
        i.commands_operation_literal(Operation::Div, &Literal::Integer(0), &lowering),
        Err(LowerError::Internal(InternalError::DivideByZero { .. }))
    ));
    assert!(matches!(
        d.commands_operation_literal(Operation::Mod, &decimal("0.00"), &lowering),
        Err(LowerError::Internal(InternalError::DivideByZero { .. }))
    ));
}

#[test]
fn test_global_values() {
    let mut compilation = Compilation::new(Config::default());
    let g = compilation.declare("g", decimal_type(1), vec![Attribute::Global]);
    let l = compilation.declare("l", decimal_type(1), Vec::new());
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let mut machine = Machine::from_manager(manager);

    assert_eq!(machine.decimal(&g), (0, 0));
    machine.apply(manager, g.commands_set_literal(&decimal("0.5")));
    machine.apply(manager, l.commands_set_literal(&decimal("-1.0")));
    machine.apply(manager, g.commands_add(&l, &lowering));
    assert_eq!(machine.score("_", "g"), Some(0));
    assert_eq!(machine.score("_", "g.d"), Some(-5));
}

#[test]
fn test_struct_assignment() {
    let mut compilation = Compilation::new(Config::default());
    let point = compilation
        .scoreboard
        .define_struct(StructDefinition::new(
            "Point",
            vec![
                StructField::new("x", Typedef::Integer),
                StructField::new("y", decimal_type(1)),
            ],
        ))
        .unwrap();
    let a = compilation.declare("a", Typedef::Struct(point.clone()), Vec::new());
    let b = compilation.declare("b", Typedef::Struct(point), Vec::new());
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let mut machine = Machine::from_manager(manager);

    let (ax, ay) = (a.field("x").unwrap(), a.field("y").unwrap());
    let (bx, by) = (b.field("x").unwrap(), b.field("y").unwrap());
    machine.apply(manager, a.commands_set_literal(&Literal::Null));
    machine.apply(manager, bx.commands_set_literal(&Literal::Integer(4)));
    machine.apply(manager, by.commands_set_literal(&decimal("-0.5")));

    machine.apply(manager, a.commands_set(&b, &lowering));
    assert_eq!(machine.local(ax.name()), 4);
    assert_eq!(machine.decimal(&ay), (0, -5));

    machine.apply(manager, ax.commands_set_literal(&Literal::Integer(1)));
    machine.apply(manager, a.commands_swap(&b, &lowering));
    assert_eq!(machine.local(ax.name()), 4);
    assert_eq!(machine.local(bx.name()), 1);

    assert!(matches!(
        a.commands_add(&b, &lowering),
        Err(LowerError::Lang(LangErrorKind::IncompatibleOperands { .. }))
    ));
    assert!(matches!(
        a.commands_set_literal(&Literal::Integer(1)),
        Err(LowerError::Lang(LangErrorKind::IncompatibleLiteral { .. }))
    ));
}

#[test]
fn test_literal_comparisons() {
    let (compilation, values) = setup(&[
        ("i", Typedef::Integer),
        ("d", decimal_type(2)),
        ("flag", Typedef::Boolean),
    ]);
    let manager = &compilation.scoreboard;
    let lowering = manager.lowering();
    let (i, d, flag) = (&values[0], &values[1], &values[2]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, i.commands_set_literal(&Literal::Integer(5)));
    machine.apply(manager, d.commands_set_literal(&decimal("-1.50")));
    machine.apply(manager, flag.commands_set_literal(&Literal::Boolean(true)));

    let cases = [
        (i, ScoreboardComparison::Less, decimal("5.5"), true),
        (i, ScoreboardComparison::Greater, Literal::Integer(5), false),
        (i, ScoreboardComparison::Equal, Literal::Integer(5), true),
        (i, ScoreboardComparison::NotEqual, Literal::Integer(5), false),
        (i, ScoreboardComparison::Equal, decimal("5.5"), false),
        (i, ScoreboardComparison::GreaterOrEqual, decimal("4.9"), true),
        (d, ScoreboardComparison::LessOrEqual, decimal("-1.5"), true),
        (d, ScoreboardComparison::Greater, decimal("-1.499"), false),
        (d, ScoreboardComparison::Less, decimal("-1.499"), true),
        (d, ScoreboardComparison::Equal, Literal::Integer(-1), false),
        (flag, ScoreboardComparison::Equal, Literal::Boolean(true), true),
        (flag, ScoreboardComparison::NotEqual, Literal::Boolean(true), false),
    ];
    for (value, comparison, literal, expected) in cases {
        let result = value
            .compare_to_literal(comparison, &literal, &lowering)
            .unwrap();
        machine.sync(manager);
        assert_eq!(
            machine.check(&result),
            expected,
            "{} {} {literal}",
            value.alias(),
            comparison.str_value()
        );
    }

    assert!(matches!(
        flag.compare_to_literal(ScoreboardComparison::Less, &Literal::Boolean(true), &lowering),
        Err(LowerError::Lang(LangErrorKind::UnsupportedComparison { .. }))
    ));
    assert!(matches!(
        i.compare_to_literal(ScoreboardComparison::Equal, &Literal::Null, &lowering),
        Err(LowerError::Lang(LangErrorKind::IncompatibleLiteral { .. }))
    ));
}

#[test]
fn test_comparison_filter() {
    let (compilation, values) = setup(&[("i", Typedef::Integer)]);
    let lowering = compilation.scoreboard.lowering();

    let comparison = values[0]
        .compare_to_literal(
            ScoreboardComparison::GreaterOrEqual,
            &Literal::Integer(3),
            &lowering,
        )
        .unwrap();
    assert_eq!(comparison.selector_filter(), "scores={i=3..}");
    assert!(comparison.temp().is_none());
}

#[test]
fn test_incompatible_values() {
    let (compilation, values) = setup(&[
        ("flag", Typedef::Boolean),
        ("i", Typedef::Integer),
        ("d", decimal_type(1)),
    ]);
    let lowering = compilation.scoreboard.lowering();
    let (flag, i, d) = (&values[0], &values[1], &values[2]);

    assert!(matches!(
        flag.commands_add(i, &lowering),
        Err(LowerError::Lang(LangErrorKind::IncompatibleOperands { .. }))
    ));
    assert!(matches!(
        d.commands_set(flag, &lowering),
        Err(LowerError::Lang(LangErrorKind::IncompatibleOperands { .. }))
    ));
    assert!(matches!(
        i.commands_set_literal(&Literal::Boolean(false)),
        Err(LowerError::Lang(LangErrorKind::IncompatibleLiteral { .. }))
    ));
    assert!(matches!(
        d.commands_set_literal(&Literal::Decimal("99999999999".parse().unwrap())),
        Err(LowerError::Lang(LangErrorKind::LiteralOutOfRange { .. }))
    ));
    assert!(matches!(
        i.commands_operation_literal(Operation::Swap, &Literal::Integer(1), &lowering),
        Err(LowerError::Lang(LangErrorKind::IncompatibleLiteral { .. }))
    ));
}

#[test]
fn test_temps_are_released() {
    let (compilation, values) = setup(&[("x", decimal_type(2)), ("y", decimal_type(3))]);
    let manager = &compilation.scoreboard;
    let (x, y) = (&values[0], &values[1]);

    let operations = [
        Operation::Set,
        Operation::Add,
        Operation::Sub,
        Operation::Mul,
        Operation::Swap,
    ];
    for operation in operations {
        x.commands_operation(operation, y, &manager.lowering()).unwrap();
        x.commands_operation(operation, y, &manager.legacy_lowering()).unwrap();
    }
    assert_eq!(manager.temps.depth(&Typedef::Integer, false), 0);
    assert_eq!(manager.temps.depth(&decimal_type(2), false), 0);
    assert_eq!(manager.legacy_temps().index(), 0);
}

#[test]
fn test_legacy_lowering() {
    let (compilation, values) = setup(&[("x", decimal_type(2)), ("y", decimal_type(2))]);
    let manager = &compilation.scoreboard;
    let lowering = manager.legacy_lowering();
    let (x, y) = (&values[0], &values[1]);
    let mut machine = Machine::from_manager(manager);

    machine.apply(manager, x.commands_set_literal(&Literal::Integer(3)));
    machine.apply(manager, y.commands_set_literal(&decimal("-1.50")));
    let commands = x.commands_add(y, &lowering).unwrap();
    assert!(commands.iter().any(|command| command.contains("_temp0")));

    machine.apply(manager, Ok(commands));
    assert_eq!(machine.decimal(x), (1, 50));
}

#[test]
fn test_compiled_program() {
    let mut compilation = Compilation::new(Config::default());
    let x = compilation.declare("x", decimal_type(2), vec![Attribute::Global]);
    let y = compilation.declare("a_long_decimal_name", decimal_type(2), Vec::new());

    compilation.open_function("main");
    compilation
        .lower(Span::new(0, 0), |_| x.commands_set_literal(&decimal("-0.25")))
        .unwrap();
    compilation
        .lower(Span::new(0, 0), |_| y.commands_set_literal(&decimal("0.50")))
        .unwrap();
    compilation
        .lower(Span::new(0, 0), |scoreboard| {
            x.commands_add(&y, &scoreboard.lowering())
        })
        .unwrap();

    let program = compilation.finish();
    assert!(program.function("_mcc/borrow/x").is_some());
    assert_eq!(y.name().len(), 8);

    let mut machine = Machine::new(&program);
    machine.call("main");
    assert_eq!(machine.decimal(&x), (0, 25));

    let uninstall = program.uninstall.clone();
    machine.run_all(&uninstall);
    assert!(!machine.has_objective("x"));
    assert!(!machine.has_objective(y.name()));
    assert!(!machine.has_objective("_tmpGi0"));
}
