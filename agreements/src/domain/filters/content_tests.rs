use super::*;

fn group(
    grouping: Option<BoolOp>,
    attribute: ContentAttribute,
    content: &[&str],
    messages: &Messages,
) -> FilterGroup {
    FilterGroup {
        grouping,
        attribute: Some(attribute),
        content: content
            .iter()
            .map(|value| ContentSelection::labelled(*value, messages))
            .collect(),
    }
}

fn raw(expr: &str) -> Vec<String> {
    vec![expr.to_string()]
}

// ============================================================================
// encode
// ============================================================================

#[test]
fn encode_two_single_value_groups() {
    let messages = Messages::default();
    let groups = vec![
        group(None, ContentAttribute::Has, &["items"], &messages),
        group(
            Some(BoolOp::And),
            ContentAttribute::HasNot,
            &["docs"],
            &messages,
        ),
    ];

    assert_eq!(
        encode(&groups).as_deref(),
        Some("(items isNotEmpty)&&(docs isEmpty)")
    );
}

#[test]
fn encode_joins_content_with_or() {
    let messages = Messages::default();
    let groups = vec![
        group(
            None,
            ContentAttribute::Has,
            &["items", "docs", "orgs"],
            &messages,
        ),
        group(
            Some(BoolOp::Or),
            ContentAttribute::HasNot,
            &["contacts"],
            &messages,
        ),
    ];

    assert_eq!(
        encode(&groups).as_deref(),
        Some("(items isNotEmpty||docs isNotEmpty||orgs isNotEmpty)||(contacts isEmpty)")
    );
}

#[test]
fn encode_never_pads_operators() {
    let messages = Messages::default();
    let groups = vec![
        group(None, ContentAttribute::Has, &["items", "tags"], &messages),
        group(Some(BoolOp::And), ContentAttribute::HasNot, &["docs"], &messages),
        group(Some(BoolOp::Or), ContentAttribute::Has, &["orgs", "contacts"], &messages),
    ];

    let expr = encode(&groups).unwrap();
    assert!(!expr.contains(" && "));
    assert!(!expr.contains(" || "));
}

#[test]
fn encode_skips_when_any_group_incomplete() {
    let messages = Messages::default();
    let complete = group(None, ContentAttribute::Has, &["items"], &messages);

    let missing_attribute = FilterGroup {
        grouping: Some(BoolOp::And),
        attribute: None,
        content: vec![ContentSelection::labelled("docs", &messages)],
    };
    assert_eq!(encode(&[complete.clone(), missing_attribute]), None);

    let missing_content = FilterGroup {
        grouping: Some(BoolOp::Or),
        attribute: Some(ContentAttribute::HasNot),
        content: Vec::new(),
    };
    assert_eq!(encode(&[complete.clone(), missing_content]), None);

    assert_eq!(encode(&[FilterGroup::default()]), None);
    assert_eq!(encode(&[]), None);
}

#[test]
fn encode_skips_content_outside_vocabulary() {
    let messages = Messages::default();
    let complete = group(None, ContentAttribute::Has, &["items"], &messages);

    for value in ["", "docs)", "BookSeries", "items isEmpty||tags"] {
        let unknown = group(Some(BoolOp::And), ContentAttribute::Has, &[value], &messages);
        assert!(!unknown.is_valid(), "{value:?}");
        assert_eq!(encode(&[complete.clone(), unknown]), None, "{value:?}");
    }

    let mixed = group(None, ContentAttribute::HasNot, &["docs", "docs)"], &messages);
    assert_eq!(encode(&[mixed]), None);
}

#[test]
fn encode_ignores_grouping_on_first_row() {
    let messages = Messages::default();
    let groups = vec![group(
        Some(BoolOp::Or),
        ContentAttribute::Has,
        &["items"],
        &messages,
    )];
    assert_eq!(encode(&groups).as_deref(), Some("(items isNotEmpty)"));
}

#[test]
fn encode_defaults_missing_grouping_to_and() {
    let messages = Messages::default();
    let groups = vec![
        group(None, ContentAttribute::Has, &["items"], &messages),
        group(None, ContentAttribute::Has, &["docs"], &messages),
    ];
    assert_eq!(
        encode(&groups).as_deref(),
        Some("(items isNotEmpty)&&(docs isNotEmpty)")
    );
}

// ============================================================================
// decode
// ============================================================================

#[test]
fn decode_empty_state_yields_placeholder() {
    let messages = Messages::default();
    assert_eq!(decode(&[], &messages).unwrap(), vec![FilterGroup::default()]);
    assert_eq!(
        decode(&raw(""), &messages).unwrap(),
        vec![FilterGroup::default()]
    );
    assert_eq!(
        decode(&raw("  "), &messages).unwrap(),
        vec![FilterGroup::default()]
    );
}

#[test]
fn decode_places_grouping_on_later_rows_only() {
    let messages = Messages::default();
    let groups = decode(
        &raw("(items isNotEmpty)&&(docs isEmpty)||(orgs isNotEmpty)"),
        &messages,
    )
    .unwrap();

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].grouping, None);
    assert_eq!(groups[1].grouping, Some(BoolOp::And));
    assert_eq!(groups[2].grouping, Some(BoolOp::Or));
    assert_eq!(groups[1].attribute, Some(ContentAttribute::HasNot));
}

#[test]
fn decode_labels_content() {
    let messages = Messages::default();
    let groups = decode(&raw("(items isNotEmpty||docs isNotEmpty)"), &messages).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].attribute, Some(ContentAttribute::Has));
    assert_eq!(
        groups[0].content,
        vec![
            ContentSelection {
                value: "items".to_string(),
                label: Some("Agreement lines".to_string()),
            },
            ContentSelection {
                value: "docs".to_string(),
                label: Some("Core documents".to_string()),
            },
        ]
    );
}

#[test]
fn decode_unknown_content_has_no_label() {
    let messages = Messages::default();
    let groups = decode(&raw("(BookSeries isNotEmpty)"), &messages).unwrap();

    assert_eq!(groups[0].content[0].value, "BookSeries");
    assert_eq!(groups[0].content[0].label, None);
    assert!(!groups[0].is_valid());
    assert_eq!(encode(&groups), None);
}

#[test]
fn decode_uses_first_comparator_of_mixed_group() {
    let messages = Messages::default();
    let groups = decode(&raw("(items isEmpty||docs isNotEmpty)"), &messages).unwrap();

    assert_eq!(groups[0].attribute, Some(ContentAttribute::HasNot));
    assert_eq!(groups[0].content.len(), 2);
}

#[test]
fn decode_unsupported_comparator_leaves_attribute_empty() {
    let messages = Messages::default();
    let groups = decode(&raw("(items==1)"), &messages).unwrap();

    assert_eq!(groups[0].attribute, None);
    assert_eq!(groups[0].content[0].value, "items");
    assert!(!groups[0].is_valid());
}

#[test]
fn decode_bare_term_is_single_value_group() {
    let messages = Messages::default();
    let groups = decode(&raw("items isNotEmpty&&(docs isEmpty)"), &messages).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].content.len(), 1);
    assert_eq!(groups[0].content[0].value, "items");
    assert_eq!(groups[1].grouping, Some(BoolOp::And));
}

#[test]
fn decode_only_reads_first_expression() {
    let messages = Messages::default();
    let groups = decode(
        &["(items isNotEmpty)".to_string(), "(docs isEmpty)".to_string()],
        &messages,
    )
    .unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].content[0].value, "items");
}

#[test]
fn decode_malformed_expression_is_an_error() {
    let messages = Messages::default();
    assert!(matches!(
        decode(&raw("(items isNotEmpty"), &messages),
        Err(KiwtError::UnclosedGroup { .. })
    ));
}

// ============================================================================
// round trips
// ============================================================================

#[test]
fn round_trip_groups() {
    let messages = Messages::default();
    let cases = vec![
        vec![group(None, ContentAttribute::Has, &["items"], &messages)],
        vec![
            group(None, ContentAttribute::Has, &["items"], &messages),
            group(Some(BoolOp::And), ContentAttribute::HasNot, &["docs"], &messages),
        ],
        vec![
            group(
                None,
                ContentAttribute::HasNot,
                &["linkedLicenses", "externalLicenseDocs"],
                &messages,
            ),
            group(
                Some(BoolOp::Or),
                ContentAttribute::Has,
                &["orgs", "contacts", "tags"],
                &messages,
            ),
            group(
                Some(BoolOp::And),
                ContentAttribute::Has,
                &["usageDataProviders"],
                &messages,
            ),
        ],
    ];

    for groups in cases {
        let expr = encode(&groups).unwrap();
        assert_eq!(decode(&raw(&expr), &messages).unwrap(), groups, "{}", expr);
    }
}

#[test]
fn round_trip_expression() {
    let messages = Messages::default();
    let expr = "(items isNotEmpty||docs isNotEmpty)&&(orgs isEmpty)||(tags isNotEmpty)";

    let groups = decode(&raw(expr), &messages).unwrap();
    assert_eq!(encode(&groups).as_deref(), Some(expr));
}

#[test]
fn round_trip_spaced_expression_normalizes() {
    let messages = Messages::default();
    let groups = decode(
        &raw("(items isNotEmpty || docs isNotEmpty) && (orgs isEmpty)"),
        &messages,
    )
    .unwrap();

    assert_eq!(
        encode(&groups).as_deref(),
        Some("(items isNotEmpty||docs isNotEmpty)&&(orgs isEmpty)")
    );
}

// ============================================================================
// serde
// ============================================================================

#[test]
fn filter_group_from_json() {
    let json = r#"[
        {"attribute": "isNotEmpty", "content": ["items", {"value": "docs", "label": "Docs"}]},
        {"grouping": "||", "attribute": "isEmpty", "content": ["orgs"]},
        {"grouping": "&&"}
    ]"#;
    let groups: Vec<FilterGroup> = serde_json::from_str(json).unwrap();

    assert_eq!(groups.len(), 3);
    assert_eq!(groups[0].content[0].label, None);
    assert_eq!(groups[0].content[1].label.as_deref(), Some("Docs"));
    assert_eq!(groups[1].grouping, Some(BoolOp::Or));
    assert!(!groups[2].is_valid());
}

#[test]
fn filter_group_to_json_omits_empty_fields() {
    let json = serde_json::to_string(&FilterGroup::default()).unwrap();
    assert_eq!(json, r#"{"content":[]}"#);
}
