use crate::{test, test_error};

test!(
    restore_options,
    r#"
    set options.foo "bar"
    stash options
    set options.foo "baz"
    show options
    restore options
    show options
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"foo": "baz"}
    {"foo": "bar"}
    "#
);

test!(
    restore_options_from_custom_name,
    r#"
    set options.foo "bar"
    stash options foo
    set options.foo "baz"
    stash options bar
    set options.bar "qux"
    show options
    restore options foo
    show options
    restore options bar
    show options
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"foo": "baz", "bar": "qux"}
    {"foo": "bar"}
    {"foo": "baz"}
    "#
);

test!(
    restore_from_multiple_stash_calls,
    r#"
    set options.foo "bar"
    stash options
    set options.foo "baz"
    stash options
    set options.foo "qux"
    restore options
    show options
    restore options
    show options
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"foo": "baz"}
    {"foo": "bar"}
    "#
);

test!(
    restore_previous_state_without_name,
    r#"
    set options.foo "bar"
    stash options before something
    set options.foo "baz"
    stash options after something
    set options.foo "qux"
    restore options
    show options
    restore options
    show options
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"foo": "baz"}
    {"foo": "bar"}
    "#
);

test!(
    restore_multiple_properties,
    r#"
    set options.foo "bar"
    set cache.foo "FOO"
    stash options before something
    stash cache before something
    set options.foo "baz"
    set cache.foo "BAZ"
    stash options after something
    stash cache after something
    set options.foo "qux"
    set cache.foo "QUX"
    restore options
    show options
    restore cache
    show cache
    restore options
    show options
    restore cache
    show cache
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"foo": "baz"}
    {"foo": "BAZ"}
    {"foo": "bar"}
    {"foo": "FOO"}
    "#
);

test!(
    restore_non_top_name_keeps_pending_stack,
    r#"
    set options.n 1
    stash options a
    set options.n 2
    stash options b
    set options.n 3
    restore options a
    show options
    restore options
    show options
    restore options
    show options
    "#,
    r#"
    {"options": {}}
    "#,
    r#"
    {"n": 1}
    {"n": 2}
    {"n": 1}
    "#
);

test!(
    restore_top_name_pops_it,
    r#"
    set options.n 1
    stash options a
    set options.n 2
    stash options b
    restore options b
    show options
    restore options
    show options
    "#,
    r#"
    {"options": {}}
    "#,
    r#"
    {"n": 2}
    {"n": 1}
    "#
);

test!(
    restore_same_name_repeatedly_without_popping,
    r#"
    set options.n 1
    stash options a
    stash options b
    set options.n 5
    restore options a
    set options.n 6
    restore options a
    show options
    "#,
    r#"
    {"options": {}}
    "#,
    r#"
    {"n": 1}
    "#
);

test!(
    restore_after_reassignment,
    r#"
    stash options first
    set options {"replaced": true}
    stash options second
    set options {}
    restore options
    show options
    restore options
    show options
    "#,
    r#"
    {"options": {"original": true}}
    "#,
    r#"
    {"replaced": true}
    {"original": true}
    "#
);

test!(
    restore_round_trip_per_name,
    r#"
    set options.v 0
    stash options zero
    set options.v 1
    stash options one
    set options.v 2
    restore options zero
    show options
    set options.v 9
    restore options one
    show options
    "#,
    r#"
    {"options": {}}
    "#,
    r#"
    {"v": 0}
    {"v": 1}
    "#
);

test!(
    properties_with_same_names_are_independent,
    r#"
    set options.v "o1"
    set cache.v "c1"
    stash options x
    stash cache x
    set options.v "o2"
    set cache.v "c2"
    restore options x
    show options
    show cache
    restore cache
    show cache
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"v": "o1"}
    {"v": "c2"}
    {"v": "c1"}
    "#
);

test_error!(
    restore_nothing_stashed,
    "restore options",
    r#"{"options": {}}"#,
    "line 1: Nothing is stashed for `app.options`"
);

test_error!(
    restore_with_empty_stack,
    "stash options; restore options; restore options",
    r#"{"options": {}}"#,
    "line 1: Nothing is stashed for `app.options`"
);

test_error!(
    restore_unknown_name,
    "stash options a\nrestore options zzz",
    r#"{"options": {}}"#,
    "line 2: No snapshot named `zzz` is stashed for `app.options`"
);

test_error!(
    restore_onto_non_object,
    "stash options; set options 1; restore options",
    r#"{"options": {}}"#,
    "line 1: expected `app.options` to be an object, got number"
);
