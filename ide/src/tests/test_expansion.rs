use crate::tests::completion_dsl::{Expr, Workspace, caret, fixture};
use crate::{CompletionConfig, EXPANSION_INVOCATION_COUNT, TailPolicy};
use semantic::{Modifiers, SymbolDecl, Ty};
use std::collections::HashSet;

fn string() -> Ty {
    Ty::class("String")
}

fn list_of(element: Ty) -> Ty {
    Ty::generic("List", [element])
}

fn catalog_with(config: CompletionConfig, statement: Expr) -> Workspace {
    let mut f = fixture();
    f.config(config);
    f.library_class("Range", &[], Vec::new());
    f.library_member("Range", SymbolDecl::field("low", Ty::int()));
    f.library_member("List", SymbolDecl::method("size", Ty::int(), Vec::new()));
    f.library_member("List", SymbolDecl::method("get", Ty::param("E"), vec![Ty::int()]));
    f.library_member("String", SymbolDecl::method("length", Ty::int(), Vec::new()));
    f.class("Catalog", |c| {
        c.field("names", Ty::array_of(string()), Modifiers::empty());
        c.field("title", string(), Modifiers::empty());
        c.field("bounds", Ty::class("Range"), Modifiers::empty());
        c.method("items", list_of(string()), &[], |_| {});
        c.method("clear", Ty::Void, &[], |_| {});
        c.method("find", string(), &[("id", Ty::int())], |_| {});
        c.method("run", Ty::Void, &[], |m| {
            m.expr_stmt(statement);
        });
    });
    f.build()
}

fn catalog() -> Workspace {
    catalog_with(CompletionConfig::default(), caret("s"))
}

#[test]
fn expansion_requires_repeated_invocation() {
    let ws = catalog();

    ws.complete(1, Some(list_of(string())))
        .expect_lookups(&["names", "title", "bounds", "items", "clear", "find", "run"]);
}

#[test]
fn expansion_offers_qualified_members() {
    let ws = catalog();
    let check = ws.complete(EXPANSION_INVOCATION_COUNT, None);

    insta::assert_snapshot!(check.render(), @r"
    names
    title
    bounds
    items
    clear
    find
    run
    title.length aka length
    bounds.low
    items().size aka size {E→String}
    items().get aka get {E→String}
    ");
}

#[test]
fn expansion_skips_void_and_parameterized_qualifiers() {
    let ws = catalog();
    let check = ws.complete(2, None);

    check.candidate("items().size");
    for lookup in check.lookups() {
        assert!(!lookup.starts_with("clear("), "{lookup}");
        assert!(!lookup.starts_with("find("), "{lookup}");
        assert!(!lookup.starts_with("run("), "{lookup}");
    }
}

#[test]
fn expansion_skips_only_the_qualifier_with_a_malformed_template() {
    let mut f = fixture();
    f.library_member("String", SymbolDecl::method("length", Ty::int(), Vec::new()));
    f.class("Main", |c| {
        c.field("bad name", string(), Modifiers::empty());
        c.field("title", string(), Modifiers::empty());
        c.method("run", Ty::Void, &[], |m| {
            m.expr_stmt(caret("t"));
        });
    });
    let ws = f.build();

    let check = ws
        .complete(2, None)
        .expect_lookups(&["bad name", "title", "run", "title.length"]);
    assert!(
        check
            .lookups()
            .iter()
            .all(|lookup| !lookup.starts_with("bad name.")),
        "{:?}",
        check.lookups()
    );
}

#[test]
fn expansion_qualified_method_inserts_prefix_and_parens() {
    let ws = catalog();
    let check = ws.complete(2, None);

    let size = check.candidate("items().size").insert_command();
    assert_eq!(size.text, "items().size()");
    assert_eq!(size.caret, 14);

    // `get(int)` takes an argument, so the caret stays inside the parentheses.
    let get = check.candidate("items().get").insert_command();
    assert_eq!(get.text, "items().get()");
    assert_eq!(get.caret, 12);

    let low = check.candidate("bounds.low");
    assert_eq!(low.qualifier_prefix().as_deref(), Some("bounds."));
    assert_eq!(low.insert_command().text, "bounds.low");
}

#[test]
fn expansion_is_idempotent_and_keys_are_unique() {
    let ws = catalog();
    let expected = Some(list_of(string()));

    let first = ws.complete(2, expected.clone());
    let second = ws.complete(2, expected);
    assert_eq!(first.outcome, second.outcome);

    let candidates = first.outcome.candidates();
    let keys: HashSet<_> = candidates.iter().map(|candidate| candidate.key()).collect();
    assert_eq!(keys.len(), candidates.len());
}

#[test]
fn expansion_uses_the_context_filter_for_members() {
    let mut f = fixture();
    f.library_member("List", SymbolDecl::method("size", Ty::int(), Vec::new()));
    f.class("Main", |c| {
        c.method("items", list_of(string()), &[], |_| {});
        c.method("size", Ty::int(), &[], |m| {
            m.ret(caret("s"));
        });
    });
    let ws = f.build();

    // The enclosing `size` is rejected; `List.size` through `items()` is a
    // different symbol and passes.
    ws.complete(2, None)
        .expect_lookups(&["items", "items().size"])
        .expect_tail(TailPolicy::UnknownDefer);
}

#[test]
fn expansion_adapter_for_array_with_assignable_component() {
    let ws = catalog();
    let check = ws.complete(2, Some(list_of(string())));

    insta::assert_snapshot!(check.render(), @r"
    names
    title
    bounds
    items
    clear
    find
    run
    Arrays.asList(names) aka java.util.Arrays.asList(names), asList(names), names
    title.length aka length
    bounds.low
    items().size aka size {E→String}
    items().get aka get {E→String}
    ");
}

#[test]
fn expansion_adapter_accepts_supertype_elements() {
    let ws = catalog();

    ws.complete(2, Some(list_of(Ty::class("Object"))))
        .expect_contains(&["Arrays.asList(names)"]);
    ws.complete(2, Some(Ty::generic("Iterable", [string()])))
        .expect_contains(&["Arrays.asList(names)"]);
}

#[test]
fn expansion_adapter_requires_expected_type() {
    let ws = catalog();

    ws.complete(2, None)
        .expect_not_contains(&["Arrays.asList(names)"]);
    // Not a sequence type: no element type to match.
    ws.complete(2, Some(string()))
        .expect_not_contains(&["Arrays.asList(names)"]);
}

#[test]
fn expansion_adapter_requires_assignable_component() {
    let ws = catalog();

    let check = ws.complete(2, Some(list_of(Ty::class("Range"))));
    assert!(
        check
            .lookups()
            .iter()
            .all(|lookup| !lookup.starts_with("Arrays.asList")),
        "{:?}",
        check.lookups()
    );
}

#[test]
fn expansion_adapter_only_for_array_qualifiers() {
    let ws = catalog();
    let check = ws.complete(2, Some(list_of(Ty::class("Object"))));

    let adapters: Vec<_> = check
        .lookups()
        .into_iter()
        .filter(|lookup| lookup.starts_with("Arrays.asList"))
        .collect();
    assert_eq!(adapters, ["Arrays.asList(names)"]);
}

#[test]
fn expansion_adapter_for_primitive_array_needs_exact_component() {
    let mut f = fixture();
    f.library_class("Integer", &[], Vec::new());
    f.class("Main", |c| {
        c.field("counts", Ty::array_of(Ty::int()), Modifiers::empty());
        c.method("run", Ty::Void, &[], |m| {
            m.expr_stmt(caret("c"));
        });
    });
    let ws = f.build();

    ws.complete(2, Some(list_of(Ty::class("Integer"))))
        .expect_not_contains(&["Arrays.asList(counts)"]);
}

#[test]
fn expansion_honours_call_paren_spacing() {
    let config = CompletionConfig {
        space_within_call_parens: true,
        ..CompletionConfig::default()
    };
    let ws = catalog_with(config, caret("s"));
    let check = ws.complete(2, Some(list_of(string())));

    check.candidate("items( ).size");
    let adapter = check.candidate("Arrays.asList(names)");
    assert_eq!(adapter.aliases[0], "java.util.Arrays.asList( names )");
}

#[test]
fn expansion_merges_qualifier_and_member_substitutions() {
    let mut f = fixture();
    f.library_class("Apple", &[], Vec::new());
    f.library_class("Rock", &[], Vec::new());
    f.library_class("Holder", &["T"], Vec::new());
    f.library_class("Box", &["T"], Vec::new());
    f.library_member("Holder", SymbolDecl::method("value", Ty::param("T"), Vec::new()));
    f.library_member(
        "Holder",
        SymbolDecl::method("boxed", Ty::generic("Box", [Ty::class("Rock")]), Vec::new()),
    );
    f.library_member("Box", SymbolDecl::method("peek", Ty::param("T"), Vec::new()));
    f.library_member("Apple", SymbolDecl::method("ripe", Ty::boolean(), Vec::new()));
    f.class_extends(
        "Basket",
        vec![Ty::generic("Holder", [Ty::class("Apple")])],
        |c| {
            c.method("run", Ty::Void, &[], |m| {
                m.expr_stmt(caret("b"));
            });
        },
    );
    let ws = f.build();
    let check = ws.complete(2, None);

    // Inner wins on conflicting keys; a missing inner keeps the outer one.
    insta::assert_snapshot!(check.render(), @r"
    run
    value {T→Apple}
    boxed {T→Apple}
    value().ripe aka ripe {T→Apple}
    boxed().peek aka peek {T→Rock}
    ");
}
