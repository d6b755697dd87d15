use super::*;
use crate::errors::RuntimeError;
use pretty_assertions::assert_eq;
use xs_ir::Registry;

/// root
/// ├── Main
/// │   ├── Foo        (shadows root/Foo inside Main)
/// │   └── Loop
/// │       └── Body
/// ├── Foo
/// │   └── Bar
/// └── Util
///     └── Util
struct Fixture {
    registry: Registry,
    main: SubroutineId,
    main_foo: SubroutineId,
    main_loop: SubroutineId,
    body: SubroutineId,
    foo: SubroutineId,
    bar: SubroutineId,
    util: SubroutineId,
    util_util: SubroutineId,
}

fn fixture() -> Fixture {
    let mut registry = Registry::new();
    let root = registry.root();
    let main = registry.add(root, "Main");
    let main_foo = registry.add(main, "Foo");
    let main_loop = registry.add(main, "Loop");
    let body = registry.add(main_loop, "Body");
    let foo = registry.add(root, "Foo");
    let bar = registry.add(foo, "Bar");
    let util = registry.add(root, "Util");
    let util_util = registry.add(util, "Util");
    Fixture {
        registry,
        main,
        main_foo,
        main_loop,
        body,
        foo,
        bar,
        util,
        util_util,
    }
}

#[test]
fn main_is_direct_child_of_root() {
    let f = fixture();
    assert_eq!(find_child(&f.registry, f.registry.root(), "Main"), Ok(f.main));
    assert_eq!(f.registry.parent(f.registry.root()), None);
}

#[test]
fn find_child_does_not_walk_outward() {
    let f = fixture();
    assert_eq!(
        find_child(&f.registry, f.main_loop, "Foo"),
        Err(RuntimeError::Resolution {
            name: "Foo".into(),
            parent: "Loop".into()
        })
    );
}

#[test]
fn nearest_enclosing_definition_wins() {
    let f = fixture();
    // From inside Main (or deeper), Main/Foo shadows root/Foo.
    assert_eq!(find_subroutine(&f.registry, "Foo", f.main), Ok(f.main_foo));
    assert_eq!(find_subroutine(&f.registry, "Foo", f.body), Ok(f.main_foo));
    // Outside Main only root/Foo is visible.
    assert_eq!(find_subroutine(&f.registry, "Foo", f.util), Ok(f.foo));
}

#[test]
fn walks_out_to_root() {
    let f = fixture();
    assert_eq!(find_subroutine(&f.registry, "Util", f.body), Ok(f.util));
}

#[test]
fn failure_at_root_reports_root_parent() {
    let f = fixture();
    assert_eq!(
        find_subroutine(&f.registry, "Missing", f.body),
        Err(RuntimeError::Resolution {
            name: "Missing".into(),
            parent: Registry::ROOT_NAME.into()
        })
    );
}

#[test]
fn dotted_call_descends_segment_by_segment() {
    let f = fixture();
    assert_eq!(resolve_call(&f.registry, "Main.Loop.Body", f.util), Ok(f.body));
    assert_eq!(resolve_call(&f.registry, "Loop.Body", f.main), Ok(f.body));
    assert_eq!(resolve_call(&f.registry, "Foo.Bar", f.util), Ok(f.bar));
}

#[test]
fn dotted_segment_may_resolve_outward_from_intermediate_scope() {
    let f = fixture();
    // "Bar" is not under Main/Foo, but each segment searches outward.
    // From Main, Foo resolves to Main/Foo, whose search for Bar walks up to
    // the root and fails there, since Bar only lives under root/Foo.
    assert!(matches!(
        resolve_call(&f.registry, "Foo.Bar", f.main),
        Err(RuntimeError::Resolution { .. })
    ));
}

#[test]
fn repeated_segments_terminate() {
    let f = fixture();
    assert_eq!(resolve_call(&f.registry, "Util.Util", f.main), Ok(f.util_util));
    // Third segment: Util/Util has no child Util, walking outward finds
    // Util/Util again (child of Util).
    assert_eq!(
        resolve_call(&f.registry, "Util.Util.Util", f.main),
        Ok(f.util_util)
    );
}

#[test]
fn plain_name_resolves_like_find_subroutine() {
    let f = fixture();
    assert_eq!(resolve_call(&f.registry, "Loop", f.main), Ok(f.main_loop));
}

#[test]
fn unresolved_dotted_name_fails() {
    let f = fixture();
    assert!(resolve_call(&f.registry, "Core.Show", f.main).is_err());
    assert!(resolve_call(&f.registry, "Main..Loop", f.main).is_err());
}

#[test]
fn split_call_convention() {
    assert_eq!(split_call("Variable.Set"), ("Variable", "Set"));
    assert_eq!(split_call("A.B.C"), ("A", "B.C"));
    assert_eq!(split_call("Add"), ("Add", "Add"));
}

#[test]
fn call_segments_splits_on_separator() {
    assert_eq!(call_segments("A.B.C").as_slice(), &["A", "B", "C"]);
    assert_eq!(call_segments("Main").as_slice(), &["Main"]);
}

mod proptest_resolution {
    use super::*;
    use proptest::prelude::*;

    /// A random tree over a tiny alphabet so names repeat often.
    fn arb_registry() -> impl Strategy<Value = Registry> {
        proptest::collection::vec((any::<prop::sample::Index>(), 0usize..3), 0..24).prop_map(
            |nodes| {
                let mut registry = Registry::new();
                for (parent, name) in nodes {
                    let parent = SubroutineId::new(
                        u32::try_from(parent.index(registry.len())).unwrap_or(0),
                    );
                    registry.add(parent, ["A", "B", "C"][name]);
                }
                registry
            },
        )
    }

    fn arb_call() -> impl Strategy<Value = Vec<&'static str>> {
        proptest::collection::vec(prop_oneof![Just("A"), Just("B"), Just("C")], 1..6)
    }

    proptest! {
        #[test]
        fn resolved_target_carries_last_segment(
            registry in arb_registry(),
            segments in arb_call(),
            scope in any::<prop::sample::Index>(),
        ) {
            let scope = SubroutineId::new(u32::try_from(scope.index(registry.len())).unwrap_or(0));
            let name = segments.join(".");
            if let Ok(target) = resolve_call(&registry, &name, scope) {
                prop_assert_eq!(registry[target].name(), *segments.last().unwrap_or(&""));
            }
        }

        #[test]
        fn chain_of_k_segments_resolves_to_deepest(depth in 1usize..12) {
            let mut registry = Registry::new();
            let mut parent = registry.root();
            let mut segments = Vec::new();
            for _ in 0..depth {
                // Same name at every level: each segment must descend one level.
                parent = registry.add(parent, "N");
                segments.push("N");
            }
            let name = segments.join(".");
            prop_assert_eq!(resolve_call(&registry, &name, registry.root()), Ok(parent));
        }
    }
}
