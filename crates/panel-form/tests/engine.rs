use panel_form::markup::{
    CONDITION_FIELD_ATTR, CONDITION_VALUE_ATTR, CONDITIONAL_FIELD_CLASS, CUSTOM_DNS_TEXT_CLASS,
    FIELD_CONTAINER_CLASS,
};
use panel_form::{
    ConditionTable, CustomValueConfig, Display, Document, Element, ElementKind, Handler,
    InputType, NodeId, TriggerState, TriggerValue, apply_condition, compute_field_states,
    initialize_conditions, require_static_inputs,
};

struct Fixture {
    doc: Document,
    metric: NodeId,
    grafana_field: NodeId,
    grafana_url: NodeId,
    push_field: NodeId,
    push_url: NodeId,
    push_hidden: NodeId,
    push_switch: NodeId,
    cf_switch: NodeId,
    cf_fallback: NodeId,
    cf_field: NodeId,
    cf_zone: NodeId,
    dns: NodeId,
    mode: NodeId,
    mode_field: NodeId,
    custom_text: NodeId,
    notes: NodeId,
}

fn conditional(field: &str, value: &str) -> Element {
    Element::container()
        .with_class(FIELD_CONTAINER_CLASS)
        .with_class(CONDITIONAL_FIELD_CLASS)
        .with_data(CONDITION_FIELD_ATTR, field)
        .with_data(CONDITION_VALUE_ATTR, value)
}

fn text(name: &str) -> Element {
    Element::input(InputType::Text)
        .with_id(name)
        .with_name(name)
}

fn fixture() -> Fixture {
    let mut doc = Document::new();
    let root = doc.root();

    let metric_box = doc.append(root, Element::container().with_class(FIELD_CONTAINER_CLASS));
    let metric = doc.append(
        metric_box,
        Element::select()
            .with_id("METRIC_PUSH_METHOD")
            .with_name("METRIC_PUSH_METHOD")
            .with_value("grafana_agent")
            .with_handler(Handler::Condition),
    );

    let grafana_field = doc.append(root, conditional("METRIC_PUSH_METHOD", "grafana_agent"));
    let grafana_url = doc.append(grafana_field, text("GRAFANA_URL"));

    let push_field = doc.append(root, conditional("METRIC_PUSH_METHOD", "pushgateway"));
    let push_url = doc.append(push_field, text("PUSH_URL").with_required(true));
    let push_hidden = doc.append(
        push_field,
        Element::input(InputType::Hidden)
            .with_name("PUSH_FLAG")
            .with_value("off")
            .with_required(true),
    );
    let push_switch = doc.append(push_field, Element::switch("PUSH_FLAG", "on"));

    let cf_box = doc.append(root, Element::container().with_class(FIELD_CONTAINER_CLASS));
    let cf_wrapper = doc.append(cf_box, Element::container().with_class("form-switch"));
    let cf_fallback = doc.append(
        cf_wrapper,
        Element::input(InputType::Hidden)
            .with_name("CF_ENABLE")
            .with_value("false"),
    );
    let cf_switch = doc.append(
        cf_wrapper,
        Element::switch("CF_ENABLE", "true")
            .with_id("CF_ENABLE")
            .with_checked(true)
            .with_handler(Handler::Condition),
    );
    let cf_field = doc.append(root, conditional("CF_ENABLE", "true"));
    let cf_zone = doc.append(cf_field, text("CF_ZONE_ID"));

    let dns_box = doc.append(root, Element::container().with_class(FIELD_CONTAINER_CLASS));
    let dns = doc.append(
        dns_box,
        Element::select()
            .with_id("CUSTOM_DNS")
            .with_name("CUSTOM_DNS")
            .with_value("controld"),
    );

    let mode = doc.append(
        root,
        Element::input(InputType::Radio)
            .with_name("MODE")
            .with_value("advanced")
            .with_handler(Handler::Condition),
    );
    let mode_field = doc.append(root, conditional("MODE", "advanced"));
    let custom_text = doc.append(
        mode_field,
        text("CUSTOM_DNS_TEXT").with_class(CUSTOM_DNS_TEXT_CLASS),
    );
    let notes = doc.append(
        mode_field,
        Element::new(ElementKind::Textarea).with_name("NOTES"),
    );

    Fixture {
        doc,
        metric,
        grafana_field,
        grafana_url,
        push_field,
        push_url,
        push_hidden,
        push_switch,
        cf_switch,
        cf_fallback,
        cf_field,
        cf_zone,
        dns,
        mode,
        mode_field,
        custom_text,
        notes,
    }
}

#[test]
fn table_indexes_dependents_by_trigger() {
    let fx = fixture();
    let table = ConditionTable::from_document(&fx.doc);
    assert_eq!(table.len(), 4);
    let metric: Vec<_> = table
        .for_trigger("METRIC_PUSH_METHOD")
        .map(|entry| (entry.dependent, entry.required_value.as_str()))
        .collect();
    assert_eq!(
        metric,
        vec![
            (fx.grafana_field, "grafana_agent"),
            (fx.push_field, "pushgateway")
        ]
    );
    assert_eq!(table.for_trigger("UNKNOWN").count(), 0);
    assert_eq!(
        table.triggers().collect::<Vec<_>>(),
        vec!["CF_ENABLE", "METRIC_PUSH_METHOD", "MODE"]
    );
    assert_eq!(table.entries()[2].dependent, fx.cf_field);
    assert_eq!(table.entries()[3].required_value, "advanced");
}

#[test]
fn select_trigger_shows_only_matching_fields() {
    let mut fx = fixture();
    let table = ConditionTable::from_document(&fx.doc);
    let custom = CustomValueConfig::default();

    apply_condition(&mut fx.doc, &table, &custom, fx.metric);
    assert_eq!(fx.doc[fx.grafana_field].display, Display::Block);
    assert_eq!(fx.doc[fx.push_field].display, Display::Hidden);
    assert!(fx.doc[fx.grafana_url].required);
    assert!(!fx.doc[fx.push_url].required);

    fx.doc[fx.metric].value = "pushgateway".into();
    apply_condition(&mut fx.doc, &table, &custom, fx.metric);
    assert_eq!(fx.doc[fx.grafana_field].display, Display::Hidden);
    assert_eq!(fx.doc[fx.push_field].display, Display::Block);
    assert!(!fx.doc[fx.grafana_url].required);
    assert!(fx.doc[fx.push_url].required);
}

#[test]
fn switches_and_hidden_inputs_keep_their_required_flag() {
    let mut fx = fixture();
    let table = ConditionTable::from_document(&fx.doc);
    let custom = CustomValueConfig::default();

    apply_condition(&mut fx.doc, &table, &custom, fx.metric);
    assert_eq!(fx.doc[fx.push_field].display, Display::Hidden);
    assert!(fx.doc[fx.push_hidden].required);

    fx.doc[fx.metric].value = "pushgateway".into();
    apply_condition(&mut fx.doc, &table, &custom, fx.metric);
    assert!(!fx.doc[fx.push_switch].required);
}

#[test]
fn switch_trigger_pairs_with_hidden_fallback() {
    let mut fx = fixture();
    let table = ConditionTable::from_document(&fx.doc);
    let custom = CustomValueConfig::default();

    apply_condition(&mut fx.doc, &table, &custom, fx.cf_switch);
    assert_eq!(fx.doc[fx.cf_field].display, Display::Block);
    assert!(fx.doc[fx.cf_zone].required);
    assert!(fx.doc[fx.cf_fallback].disabled);

    fx.doc[fx.cf_switch].checked = false;
    apply_condition(&mut fx.doc, &table, &custom, fx.cf_switch);
    assert_eq!(fx.doc[fx.cf_field].display, Display::Hidden);
    assert!(!fx.doc[fx.cf_zone].required);
    assert!(!fx.doc[fx.cf_fallback].disabled);
}

#[test]
fn switch_value_must_match_condition() {
    let mut fx = fixture();
    fx.doc[fx.cf_switch].value = "yes".into();
    let table = ConditionTable::from_document(&fx.doc);
    apply_condition(&mut fx.doc, &table, &CustomValueConfig::default(), fx.cf_switch);
    assert_eq!(fx.doc[fx.cf_field].display, Display::Hidden);
    assert!(fx.doc[fx.cf_fallback].disabled);
}

#[test]
fn unchecked_radio_resolves_to_nothing() {
    let mut fx = fixture();
    let state = TriggerState::read(&fx.doc, fx.mode).expect("radio has a name");
    assert_eq!(state.value, TriggerValue::Resolved(None));

    let table = ConditionTable::from_document(&fx.doc);
    let custom = CustomValueConfig::default();
    apply_condition(&mut fx.doc, &table, &custom, fx.mode);
    assert_eq!(fx.doc[fx.mode_field].display, Display::Hidden);

    fx.doc[fx.mode].checked = true;
    apply_condition(&mut fx.doc, &table, &custom, fx.mode);
    assert_eq!(fx.doc[fx.mode_field].display, Display::Block);
}

#[test]
fn custom_text_requires_custom_selection() {
    let mut fx = fixture();
    fx.doc[fx.mode].checked = true;
    let table = ConditionTable::from_document(&fx.doc);
    let custom = CustomValueConfig::default();

    apply_condition(&mut fx.doc, &table, &custom, fx.mode);
    assert!(!fx.doc[fx.custom_text].required);
    assert!(fx.doc[fx.notes].required);

    fx.doc[fx.dns].value = "custom".into();
    apply_condition(&mut fx.doc, &table, &custom, fx.mode);
    assert!(fx.doc[fx.custom_text].required);

    fx.doc[fx.mode].checked = false;
    apply_condition(&mut fx.doc, &table, &custom, fx.mode);
    assert!(!fx.doc[fx.custom_text].required);
    assert!(!fx.doc[fx.notes].required);
}

#[test]
fn applying_twice_changes_nothing() {
    let mut fx = fixture();
    let table = ConditionTable::from_document(&fx.doc);
    let custom = CustomValueConfig::default();

    for trigger in [fx.metric, fx.cf_switch, fx.mode] {
        apply_condition(&mut fx.doc, &table, &custom, trigger);
        let once = fx.doc.clone();
        apply_condition(&mut fx.doc, &table, &custom, trigger);
        assert_eq!(fx.doc, once);
    }
}

#[test]
fn computing_states_leaves_document_untouched() {
    let fx = fixture();
    let table = ConditionTable::from_document(&fx.doc);
    let before = fx.doc.clone();
    let triggers: Vec<_> = [fx.metric, fx.cf_switch]
        .into_iter()
        .filter_map(|node| TriggerState::read(&fx.doc, node))
        .collect();

    let states = compute_field_states(&fx.doc, &table, &triggers, &CustomValueConfig::default());
    assert_eq!(fx.doc, before);
    assert_eq!(states.is_visible(fx.grafana_field), Some(true));
    assert_eq!(states.is_visible(fx.push_field), Some(false));
    assert_eq!(states.is_required(fx.push_url), Some(false));
    assert_eq!(states.is_required(fx.push_hidden), None);
    assert_eq!(states.fallbacks.get(&fx.cf_fallback), Some(&true));
    assert_eq!(states.is_visible(fx.mode_field), None);
}

#[test]
fn nameless_trigger_is_ignored() {
    let mut fx = fixture();
    fx.doc[fx.metric].name = None;
    let table = ConditionTable::from_document(&fx.doc);
    let before = fx.doc.clone();
    apply_condition(&mut fx.doc, &table, &CustomValueConfig::default(), fx.metric);
    assert_eq!(fx.doc, before);
}

#[test]
fn initialization_covers_wired_selects_and_checkboxes() {
    let mut fx = fixture();
    fx.doc[fx.cf_switch].checked = false;
    let table = ConditionTable::from_document(&fx.doc);
    initialize_conditions(&mut fx.doc, &table, &CustomValueConfig::default());

    assert_eq!(fx.doc[fx.grafana_field].display, Display::Block);
    assert_eq!(fx.doc[fx.push_field].display, Display::Hidden);
    assert_eq!(fx.doc[fx.cf_field].display, Display::Hidden);
    assert!(!fx.doc[fx.cf_fallback].disabled);
    // radios are not part of the load-time pass
    assert_eq!(fx.doc[fx.mode_field].display, Display::Unset);
}

#[test]
fn static_pass_requires_plain_visible_controls() {
    let mut fx = fixture();
    let root = fx.doc.root();
    let hidden_box = fx.doc.append(
        root,
        Element::container()
            .with_class(FIELD_CONTAINER_CLASS)
            .with_display(Display::Hidden),
    );
    let hidden_text = fx.doc.append(hidden_box, text("HIDDEN_TEXT"));
    let loose = fx.doc.append(root, text("LOOSE"));

    require_static_inputs(&mut fx.doc, &CustomValueConfig::default());

    assert!(fx.doc[fx.metric].required);
    assert!(fx.doc[fx.dns].required);
    assert!(!fx.doc[fx.cf_switch].required);
    assert!(!fx.doc[fx.cf_fallback].required);
    assert!(!fx.doc[fx.grafana_url].required);
    assert!(!fx.doc[fx.custom_text].required);
    assert!(!fx.doc[hidden_text].required);
    assert!(!fx.doc[loose].required);
}
