//! Integration tests for formwork.
//!
//! These tests exercise the public API from outside the crate: view
//! transformation, component registration, and business event routing
//! working together.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use formwork::component::{ComponentRegistry, FormView};
use formwork::dom::{NodeData, NodeId, Value, ViewTree};
use formwork::event::{keys, types, Destination, EventFilter, EventRouter, Key, RawEvent};
use formwork::tag::{ClassRegistry, ParseContext, Parser, TagLibrary};
use formwork::testing::tree_to_string;

type Log = Rc<RefCell<Vec<String>>>;

// ---------------------------------------------------------------------------
// View transformation
// ---------------------------------------------------------------------------

/// Build the canonical demo view:
/// ```text
/// main
///   div component="orders"
///     table
///       tr foreach="i in 0..1"
///         input source="employees" name="city" row="$i"
/// ```
fn build_view(tree: &mut ViewTree) -> (NodeId, NodeId) {
    let root = tree.insert(NodeData::new("main"));
    let holder = tree.insert_child(root, NodeData::new("div").with_attr("component", "orders"));
    let table = tree.insert_child(holder, NodeData::new("table"));
    let row = tree.insert_child(
        table,
        NodeData::new("tr").with_attr("foreach", "i in 0..1"),
    );
    tree.insert_child(
        row,
        NodeData::new("input")
            .with_attr("source", "employees")
            .with_attr("name", "city")
            .with_attr("row", "$i"),
    );
    (root, holder)
}

#[test]
fn parse_expands_foreach_and_consumes_component() {
    let mut tree = ViewTree::new();
    let (root, holder) = build_view(&mut tree);

    let library = TagLibrary::with_defaults();
    let mut classes = ClassRegistry::new();
    classes.add_simple("orders");
    let mut registry = ComponentRegistry::new();

    let mut parser = Parser::new(&library);
    let mut ctx = ParseContext {
        tree: &mut tree,
        components: &mut registry,
        classes: &classes,
    };
    parser.parse(&mut ctx, root).unwrap();

    insta::assert_snapshot!(tree_to_string(&tree, root), @r#"
    main
      div component="orders"
        table
          tr foreach="i in 0..1"
            input source="employees" name="city" row="0"
          tr foreach="i in 0..1"
            input source="employees" name="city" row="1"
    "#);

    // The consuming descriptor produced exactly one component, bound to the
    // holder element.
    let consumed = parser.consumed("component");
    assert_eq!(consumed.len(), 1);
    assert_eq!(registry.component_of(&tree, holder), Some(consumed[0]));
    assert_eq!(registry.name(consumed[0]), Some("orders"));
}

#[test]
fn malformed_foreach_fails_the_parse() {
    let mut tree = ViewTree::new();
    let root = tree.insert(NodeData::new("main"));
    tree.insert_child(root, NodeData::new("tr").with_attr("foreach", "i upto 3"));

    let library = TagLibrary::with_defaults();
    let classes = ClassRegistry::new();
    let mut registry = ComponentRegistry::new();
    let mut parser = Parser::new(&library);
    let mut ctx = ParseContext {
        tree: &mut tree,
        components: &mut registry,
        classes: &classes,
    };
    let err = parser.parse(&mut ctx, root).unwrap_err();
    assert!(err.to_string().contains("i upto 3"));
}

// ---------------------------------------------------------------------------
// Event routing over a parsed view
// ---------------------------------------------------------------------------

struct App {
    tree: ViewTree,
    registry: ComponentRegistry,
    router: EventRouter,
    form: FormView,
    inputs: Vec<NodeId>,
}

/// Parse the demo view under a `FormView` and wire the consumed component
/// as its child.
fn build_app() -> App {
    let mut tree = ViewTree::new();
    let (root, holder) = build_view(&mut tree);

    let library = TagLibrary::with_defaults();
    let mut classes = ClassRegistry::new();
    classes.add_simple("orders");
    let mut registry = ComponentRegistry::new();

    let mut form = FormView::new(&mut registry, "employees-form");
    form.set_view(&mut tree, &mut registry, &library, &classes, root)
        .unwrap();

    let orders = registry.component_of(&tree, holder).unwrap();
    registry.set_parent(orders, Some(form.key()));

    let inputs = tree.query_by_tag(root, "input");
    assert_eq!(inputs.len(), 2);

    App {
        tree,
        registry,
        router: EventRouter::new(),
        form,
        inputs,
    }
}

fn record_all(app: &mut App, log: &Log) {
    let log = Rc::clone(log);
    let dest = Destination::detached(move |event| {
        log.borrow_mut()
            .push(format!("{}:{}", event.event_type(), event.component_name()));
        Ok(true)
    });
    app.router.add_listener(&app.registry, dest, EventFilter::new());
}

#[test]
fn focus_walks_enter_chain_then_focus() {
    let mut app = build_app();
    let log: Log = Rc::default();
    record_all(&mut app, &log);

    app.router.handle_raw(
        &app.tree,
        &app.registry,
        RawEvent::FocusIn { target: app.inputs[0] },
    );

    assert_eq!(
        *log.borrow(),
        vec!["enter:employees-form", "enter:orders", "focus:orders"]
    );
}

#[test]
fn focus_transition_between_sibling_components() {
    let mut app = build_app();

    // A second form sharing no ancestry with the orders component.
    let other_root = app.tree.insert(NodeData::new("aside"));
    let main_root = app.form.view().unwrap();
    // Attach both trees under a common root so ancestor walks terminate.
    let shared = app.tree.insert(NodeData::new("body"));
    app.tree.set_root(shared);
    app.tree.reparent(main_root, shared);
    app.tree.reparent(other_root, shared);
    let other = app.registry.create("sidebar");
    app.registry.set_view(other, Some(other_root));
    app.registry.add(other);

    let log: Log = Rc::default();
    record_all(&mut app, &log);

    app.router.handle_raw(
        &app.tree,
        &app.registry,
        RawEvent::FocusIn { target: app.inputs[0] },
    );
    log.borrow_mut().clear();

    app.router
        .handle_raw(&app.tree, &app.registry, RawEvent::FocusIn { target: other_root });

    // Old chain leaves innermost-first, the new component enters, then focus.
    assert_eq!(
        *log.borrow(),
        vec![
            "leave:orders",
            "leave:employees-form",
            "enter:sidebar",
            "focus:sidebar"
        ]
    );
}

#[test]
fn input_event_reaches_scored_listeners_in_order() {
    let mut app = build_app();
    let orders = app.registry.component_of(&app.tree, app.inputs[0]).unwrap();
    let log: Log = Rc::default();

    // Specific + typed: score 2.
    let dest = {
        let log = Rc::clone(&log);
        Destination::new(orders, move |_| {
            log.borrow_mut().push("typed".into());
            Ok(true)
        })
    };
    app.router.add_listener(
        &app.registry,
        dest,
        EventFilter::new().for_type(types::INPUT).for_component(orders),
    );

    // Form filter on source+field: score 4, dispatches first.
    let dest = {
        let log = Rc::clone(&log);
        Destination::new(orders, move |event| {
            log.borrow_mut()
                .push(format!("form:{}", event.property(keys::VALUE)));
            Ok(true)
        })
    };
    app.router.add_listener(
        &app.registry,
        dest,
        EventFilter::form()
            .for_type(types::INPUT)
            .for_component(orders)
            .for_source("employees")
            .for_field("city"),
    );

    app.tree
        .get_mut(app.inputs[0])
        .unwrap()
        .set_attr("value", "Oslo");
    app.router.handle_raw(
        &app.tree,
        &app.registry,
        RawEvent::Input { target: app.inputs[0] },
    );

    assert_eq!(*log.borrow(), vec!["form:Oslo", "typed"]);
}

#[test]
fn short_circuit_and_containment_across_events() {
    let mut app = build_app();
    let orders = app.registry.component_of(&app.tree, app.inputs[0]).unwrap();
    let log: Log = Rc::default();

    let dest = {
        let log = Rc::clone(&log);
        Destination::new(orders, move |_| {
            log.borrow_mut().push("first".into());
            Ok(false)
        })
    };
    app.router.add_listener(
        &app.registry,
        dest,
        EventFilter::new().for_type(types::INPUT).for_component(orders),
    );
    record_all(&mut app, &log);

    // The typed, specific listener wins and short-circuits the recorder.
    app.router.handle_raw(
        &app.tree,
        &app.registry,
        RawEvent::Input { target: app.inputs[0] },
    );
    assert_eq!(*log.borrow(), vec!["first"]);

    // An unrelated key event still reaches the recorder.
    log.borrow_mut().clear();
    app.router.handle_raw(
        &app.tree,
        &app.registry,
        RawEvent::KeyDown { target: app.inputs[0], key: Key::Enter },
    );
    assert_eq!(*log.borrow(), vec!["keydown:orders"]);
}

#[test]
fn typing_keys_do_not_become_business_events() {
    let mut app = build_app();
    let log: Log = Rc::default();
    record_all(&mut app, &log);

    app.router.handle_raw(
        &app.tree,
        &app.registry,
        RawEvent::KeyDown { target: app.inputs[0], key: Key::Char('x') },
    );
    assert!(log.borrow().is_empty());
}

// ---------------------------------------------------------------------------
// Form round trip: input -> store -> undo
// ---------------------------------------------------------------------------

#[test]
fn form_round_trip_with_undo() {
    let mut app = build_app();

    // Seed the store with an accepted value for row 0.
    use formwork::model::{Validation, ValueStore};
    app.form.store_mut().set_value(
        "employees",
        "city",
        0,
        Value::Str("Oslo".into()),
        Validation::Required,
    );

    // The user edits row 0.
    app.tree
        .get_mut(app.inputs[0])
        .unwrap()
        .set_attr("value", "Osl");
    let input = app.router.synthesize(
        &app.tree,
        &app.registry,
        types::INPUT,
        app.form.key(),
        app.inputs[0],
    );
    app.form.handle_business_event(&mut app.tree, &input).unwrap();
    assert_eq!(
        app.form.store().value("employees", "city", 0).as_str(),
        Some("Osl")
    );

    // Undo restores the accepted value into the view.
    let undo = app.router.synthesize(
        &app.tree,
        &app.registry,
        types::UNDO,
        app.form.key(),
        app.inputs[0],
    );
    app.form.handle_business_event(&mut app.tree, &undo).unwrap();
    assert_eq!(app.tree.attr(app.inputs[0], "value"), Some("Oslo"));
    // Row 1 is untouched.
    assert_eq!(app.tree.attr(app.inputs[1], "value"), None);
}
