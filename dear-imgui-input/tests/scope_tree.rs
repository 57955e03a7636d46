use dear_imgui_input::{
    Configure, InputContext, InputError, NullBackend, NumericSettings, Root, ScopeMut, ScopeRef,
    ScopeTree, TypeKey, WidgetKind,
};
use pretty_assertions::assert_eq;
use static_assertions::{assert_impl_all, assert_not_impl_any};

assert_impl_all!(ScopeTree: Send, Sync);
assert_impl_all!(ScopeRef<'static, i32>: Copy, Send, Sync);
assert_not_impl_any!(ScopeMut<'static, i32>: Clone);

#[derive(Clone, Debug, Default, PartialEq)]
struct Style {
    rounding: u32,
    label: String,
}

struct Panel;

impl Configure for Panel {
    type Settings = Style;
}

struct Window;
struct Tab;

#[test]
fn distinct_types_get_distinct_children() {
    let mut tree = ScopeTree::new();
    let a = tree.root_mut().push::<i32>().id();
    let b = tree.root_mut().push::<f32>().id();
    let c = tree.root_mut().push::<Panel>().id();
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
    assert_eq!(tree.children_of(tree.root().id()).unwrap().count(), 3);
}

#[test]
fn push_and_use_are_idempotent() {
    let mut tree = ScopeTree::new();
    let first = tree.root_mut().push::<Panel>().id();
    let second = tree.root_mut().push::<Panel>().id();
    assert_eq!(first, second);

    let used = tree.root_mut().use_type::<Panel>().id();
    let used_again = tree.root_mut().use_type::<Panel>().id();
    assert_eq!(used, first);
    assert_eq!(used_again, first);
    assert_eq!(tree.len(), 2);
}

#[test]
fn first_push_copies_ancestor_settings() {
    // root -> Window -> Tab; Window has a customized Panel child.
    let mut tree = ScopeTree::new();
    let mut window = tree.root_mut().push::<Window>();
    window.reborrow().push::<Panel>().with_settings(|s| {
        s.rounding = 6;
        s.label = "window".to_owned();
    });

    let mut tab = window.push::<Tab>();
    let mut panel = tab.reborrow().push::<Panel>();
    assert_eq!(
        panel.settings(),
        &Style {
            rounding: 6,
            label: "window".to_owned()
        }
    );

    panel.settings_mut().rounding = 12;
    let source = tree
        .root()
        .local::<Window>()
        .and_then(|w| w.local::<Panel>())
        .unwrap();
    assert_eq!(source.settings().map(|s| s.rounding), Some(6));
}

#[test]
fn revisit_keeps_existing_settings() {
    let mut tree = ScopeTree::new();
    tree.root_mut()
        .push::<Window>()
        .push::<Panel>()
        .with_settings(|s| s.rounding = 1);
    tree.root_mut()
        .push::<Panel>()
        .with_settings(|s| s.rounding = 9);

    // The Panel under Window already exists; pushing again must not recopy.
    let mut again = tree.root_mut().push::<Window>().push::<Panel>();
    assert_eq!(again.settings().rounding, 1);
}

#[test]
fn push_default_ignores_ancestors() {
    let mut tree = ScopeTree::new();
    tree.root_mut()
        .push::<Panel>()
        .with_settings(|s| s.rounding = 4);

    let mut fresh = tree.root_mut().push::<Window>().push_default::<Panel>();
    assert_eq!(fresh.settings(), &Style::default());
}

#[test]
fn sibling_children_are_invisible() {
    // root -> X(Window), root -> Y(Tab) -> Panel
    let mut tree = ScopeTree::new();
    tree.root_mut()
        .push::<Tab>()
        .push::<Panel>()
        .with_settings(|s| s.rounding = 3);
    let window = tree.root_mut().push::<Window>().into_ref();

    assert!(window.in_ancestors::<Panel>().is_none());
    assert!(window.nearest::<Panel>().is_none());

    let mut panel = tree.root_mut().push::<Window>().push::<Panel>();
    assert_eq!(panel.settings().rounding, 0);
}

#[test]
fn push_pop_round_trip() {
    let mut tree = ScopeTree::new();
    let mut window = tree.root_mut().push::<Window>();
    let window_id = window.id();

    let back = window.reborrow().push::<Panel>().pop().unwrap();
    assert_eq!(back.id(), window_id);
    assert!(back.key().is::<Window>());

    let root = window.pop().unwrap();
    assert!(root.key().is::<Root>());
    assert!(matches!(root.pop(), Err(InputError::NoParent { .. })));
}

#[test]
fn cast_succeeds_only_on_bound_type() {
    let mut tree = ScopeTree::new();
    let panel = tree.root_mut().push::<Panel>().erase();
    let id = panel.id();
    let panel = panel.cast::<Panel>().unwrap();
    assert_eq!(panel.id(), id);

    let err = panel.erase().cast::<Window>().unwrap_err();
    assert_eq!(
        err,
        InputError::TypeMismatch {
            expected: TypeKey::of::<Window>().type_name(),
            found: TypeKey::of::<Panel>().type_name(),
        }
    );
}

#[test]
fn read_only_use_reports_not_found() {
    let mut tree = ScopeTree::new();
    tree.root_mut().push::<Window>();
    let window = tree.root().local::<Window>().unwrap();

    let err = window.use_type::<Panel>().unwrap_err();
    assert!(matches!(err, InputError::NotFound { .. }));
    assert!(err.is_recoverable());
    assert_eq!(tree.len(), 2);
}

#[test]
fn mutable_use_prefers_ancestor_scope() {
    let mut tree = ScopeTree::new();
    let root_i32 = tree
        .root_mut()
        .push::<i32>()
        .with_settings(|s: &mut NumericSettings<i32>| {
            s.max(999);
        })
        .id();

    let mut window = tree.root_mut().push::<Window>();
    let mut used = window.reborrow().use_type::<i32>();
    assert_eq!(used.id(), root_i32);
    assert_eq!(used.settings().max, 999);
    assert!(window.view().local::<i32>().is_none());
}

#[test]
fn settings_are_type_specific() {
    let mut tree = ScopeTree::new();
    tree.root_mut()
        .push::<i32>()
        .with_settings(|s| {
            s.max(5);
        });
    let mut float = tree.root_mut().push::<f32>();
    assert_eq!(float.settings().max, 1.0);
}

#[test]
fn clear_forgets_configuration() {
    let mut tree = ScopeTree::new();
    tree.root_mut()
        .push::<Panel>()
        .with_settings(|s| s.rounding = 2);
    tree.clear();
    assert_eq!(tree.len(), 1);
    assert!(tree.root().local::<Panel>().is_none());
}

#[test]
fn settings_cannot_be_stored_under_another_type() {
    let mut ctx = InputContext::<NullBackend>::new();
    let id = ctx.root_mut().push::<i32>().id();

    let err = ctx.tree_mut().settings_mut::<u8>(id).unwrap_err();
    assert!(matches!(err, InputError::TypeMismatch { .. }));
    ctx.tree_mut().settings_mut::<i32>(id).unwrap().as_slider();

    let response = ctx.submit(&NullBackend, &mut 1i32, "v").unwrap();
    assert!(!response.changed());
    assert_eq!(
        ctx.tree().settings::<i32>(id).unwrap().map(|s| s.widget),
        Some(WidgetKind::Slider)
    );
}

#[test]
fn reset_invalidates_old_ids() {
    let mut ctx = InputContext::<NullBackend>::new();
    let old = ctx.root_mut().push::<i32>().id();
    ctx.reset();
    let new = ctx.root_mut().push::<bool>().id();

    assert_eq!(old.index(), new.index());
    assert!(!ctx.tree().contains(old));
    assert_eq!(ctx.tree().key_of(old), Err(InputError::unknown_node(old)));
    assert!(ctx.tree().settings::<i32>(old).is_err());
    assert!(ctx.tree().key_of(new).unwrap().is::<bool>());
}
