use crate::{test, test_error};

test!(
    stash_options,
    r#"
    set options.foo "bar"
    show options
    stash options
    show options
    set options.foo "baz"
    show options
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"foo": "bar"}
    {"foo": "bar"}
    {"foo": "baz"}
    "#
);

test!(
    stash_options_with_custom_name,
    r#"
    set options.foo "bar"
    stash options foo
    show options
    set options.foo "baz"
    show options
    stash options bar
    show options
    set options.bar "qux"
    show options
    "#,
    r#"
    {"options": {}, "cache": {}}
    "#,
    r#"
    {"foo": "bar"}
    {"foo": "baz"}
    {"foo": "baz"}
    {"foo": "baz", "bar": "qux"}
    "#
);

test!(
    stash_nested_values_are_isolated,
    r#"
    stash options
    set options.nested {"list": [1, 2, 3]}
    restore options
    show options
    "#,
    r#"
    {"options": {"nested": {"list": []}}}
    "#,
    r#"
    {"nested": {"list": []}}
    "#
);

test_error!(
    stash_number,
    "stash count",
    r#"{"count": 3}"#,
    "line 1: expected `app.count` to be an object, got number"
);

test_error!(
    stash_array,
    "stash list",
    r#"{"list": [{"a": 1}]}"#,
    "line 1: expected `app.list` to be an object, got array"
);

test_error!(
    stash_null,
    "stash options",
    r#"{"options": null}"#,
    "line 1: expected `app.options` to be an object, got null"
);

test_error!(
    stash_missing,
    "stash missingNonObjectProp",
    "{}",
    "line 1: expected `app.missingNonObjectProp` to be an object, got nothing"
);
