//! trybuild UI tests for component_macros

#[test]
fn ui_injectable_derive() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/injectable_ok.rs");
    t.compile_fail("tests/trybuild/inject_requires_wrapper.rs");
}
