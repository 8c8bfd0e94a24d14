#![allow(clippy::unwrap_used, clippy::expect_used)]

use autocrud::exclusion::{ArtifactKind, ExclusionPolicy};
use autocrud::generator::rules::{rule, RuleMode};
use autocrud::media::MediaTable;
use autocrud::model::{Classifier, ColumnKind, ExactNames, MediaSubtype, ModelName};
use proptest::prelude::*;

fn suffix() -> impl Strategy<Value = (&'static str, MediaSubtype)> {
    prop_oneof![
        Just(("_img", MediaSubtype::Image)),
        Just(("_vid", MediaSubtype::Video)),
        Just(("_aud", MediaSubtype::Audio)),
        Just(("_doc", MediaSubtype::Document)),
    ]
}

fn model_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("User".to_string()),
        Just("Product".to_string()),
        "[A-Z][a-z]{1,8}",
    ]
}

proptest! {
    #[test]
    fn media_suffix_always_media(stem in "[a-z][a-z0-9_]{0,12}", (suffix, subtype) in suffix()) {
        let classifier = Classifier::default();
        let column = classifier.classify(&format!("{stem}{suffix}"));
        prop_assert_eq!(column.kind, ColumnKind::MediaReference(subtype));
    }

    #[test]
    fn other_names_exact_or_plain(name in "[a-z][a-z0-9_]{0,16}") {
        let classifier = Classifier::default();
        let exact = ExactNames::default();
        let kind = classifier.classify(&name).kind;
        if MediaTable::default().subtype_for(&name).is_some() {
            prop_assert!(kind.media().is_some());
        } else if exact.identifier.contains(&name) {
            prop_assert_eq!(kind, ColumnKind::Identifier);
        } else if exact.created_timestamp.contains(&name) {
            prop_assert_eq!(kind, ColumnKind::CreatedTimestamp);
        } else if exact.updated_timestamp.contains(&name) {
            prop_assert_eq!(kind, ColumnKind::UpdatedTimestamp);
        } else if exact.soft_delete_marker.contains(&name) {
            prop_assert_eq!(kind, ColumnKind::SoftDeleteMarker);
        } else if exact.sensitive.contains(&name) {
            prop_assert_eq!(kind, ColumnKind::SensitiveAuthField);
        } else {
            prop_assert_eq!(kind, ColumnKind::PlainField);
        }
    }

    #[test]
    fn exclusion_is_idempotent(
        model in model_name(),
        columns in prop::collection::vec(
            prop_oneof![
                Just("id".to_string()),
                Just("password".to_string()),
                Just("created_at".to_string()),
                Just("deleted_at".to_string()),
                "[a-z]{1,8}(_img|_doc)?",
            ],
            0..12,
        ),
    ) {
        let model = ModelName::parse(&model).unwrap();
        let columns = Classifier::default().classify_all(&columns);
        let policy = ExclusionPolicy::default();
        for artifact in ArtifactKind::ALL {
            let once = policy.filter(&model, &columns, artifact);
            let twice = policy.filter(&model, &once, artifact);
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn plain_rules_required_on_create_nullable_on_update(name in "[a-z]{1,10}") {
        let media = MediaTable::default();
        let kind = Classifier::default().classify(&name).kind;
        prop_assume!(kind == ColumnKind::PlainField);
        prop_assert_eq!(rule(kind, RuleMode::Create, &media), "['required']");
        prop_assert_eq!(rule(kind, RuleMode::Update, &media), "['nullable']");
    }
}
