//! Document graph builder: flattens the era/topic/event tree
//!
//! Traversal is depth-first in source order. Every record gets a freshly
//! generated document id and a 1-based `order` scoped to its sibling group;
//! topics and events additionally record their parent's generated id. Era
//! records keep only the known structural fields, while topic and event
//! payloads are carried through verbatim as ordered key/value maps and merged
//! with the structural fields at serialization time.

use crate::error::MigrateError;
use crate::store::{generate_document_id, DocumentId};
use serde::Serialize;
use serde_json::{Map, Value};

/// Ordered open-ended payload copied from the source tree
pub type JsonMap = Map<String, Value>;

/// An era record: title, description, sibling order. Top-level, no parent.
#[derive(Debug, Clone, Serialize)]
pub struct EraDoc {
    pub title: String,
    pub description: String,
    pub order: u32,
}

/// A topic record: arbitrary source payload plus parent era reference
#[derive(Debug, Clone, Serialize)]
pub struct TopicDoc {
    #[serde(flatten)]
    pub payload: JsonMap,
    #[serde(rename = "eraId")]
    pub era_id: DocumentId,
    pub order: u32,
}

/// An event record: arbitrary source payload plus parent topic reference
#[derive(Debug, Clone, Serialize)]
pub struct EventDoc {
    #[serde(flatten)]
    pub payload: JsonMap,
    #[serde(rename = "topicId")]
    pub topic_id: DocumentId,
    pub order: u32,
}

/// A record paired with its generated document id
#[derive(Debug, Clone)]
pub struct Staged<T> {
    pub id: DocumentId,
    pub doc: T,
}

/// The flattened output of one locale's source tree
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    pub eras: Vec<Staged<EraDoc>>,
    pub topics: Vec<Staged<TopicDoc>>,
    pub events: Vec<Staged<EventDoc>>,
}

impl DocumentGraph {
    /// Total number of staged documents across all three kinds.
    pub fn total(&self) -> usize {
        self.eras.len() + self.topics.len() + self.events.len()
    }
}

/// Flatten parsed era objects into three parallel record sequences.
pub fn build(eras: &[Value]) -> Result<DocumentGraph, MigrateError> {
    let mut graph = DocumentGraph::default();

    for (era_index, era_value) in eras.iter().enumerate() {
        let era = require_object(era_value, "era", era_index, "title")?;
        let era_id = generate_document_id();

        graph.eras.push(Staged {
            id: era_id.clone(),
            doc: EraDoc {
                title: require_string(era, "era", era_index, "title")?,
                description: require_string(era, "era", era_index, "description")?,
                order: era_index as u32 + 1,
            },
        });

        let topics = era
            .get("topics")
            .and_then(Value::as_array)
            .ok_or(MigrateError::MissingField {
                entity: "era",
                index: era_index,
                field: "topics",
            })?;

        for (topic_index, topic_value) in topics.iter().enumerate() {
            let topic = require_object(topic_value, "topic", topic_index, "payload")?;
            let topic_id = generate_document_id();

            // The events key is consumed to produce event records and must
            // never appear on the stored topic.
            let mut payload = topic.clone();
            let events = match payload.remove("events") {
                None => Vec::new(),
                Some(Value::Array(events)) => events,
                Some(_) => {
                    return Err(MigrateError::MissingField {
                        entity: "topic",
                        index: topic_index,
                        field: "events",
                    })
                }
            };

            graph.topics.push(Staged {
                id: topic_id.clone(),
                doc: TopicDoc {
                    payload,
                    era_id: era_id.clone(),
                    order: topic_index as u32 + 1,
                },
            });

            for (event_index, event_value) in events.iter().enumerate() {
                let event = require_object(event_value, "event", event_index, "payload")?;
                graph.events.push(Staged {
                    id: generate_document_id(),
                    doc: EventDoc {
                        payload: event.clone(),
                        topic_id: topic_id.clone(),
                        order: event_index as u32 + 1,
                    },
                });
            }
        }
    }

    Ok(graph)
}

fn require_object<'a>(
    value: &'a Value,
    entity: &'static str,
    index: usize,
    field: &'static str,
) -> Result<&'a JsonMap, MigrateError> {
    value.as_object().ok_or(MigrateError::MissingField {
        entity,
        index,
        field,
    })
}

fn require_string(
    map: &JsonMap,
    entity: &'static str,
    index: usize,
    field: &'static str,
) -> Result<String, MigrateError> {
    map.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(MigrateError::MissingField {
            entity,
            index,
            field,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eras(value: Value) -> Vec<Value> {
        value.as_array().unwrap().clone()
    }

    #[test]
    fn test_single_era_topic_events_scenario() {
        let source = eras(json!([{
            "title": "T1",
            "description": "D1",
            "topics": [{"name": "Topic A", "events": [{"label": "E1"}, {"label": "E2"}]}]
        }]));
        let graph = build(&source).unwrap();

        assert_eq!(graph.eras.len(), 1);
        assert_eq!(graph.topics.len(), 1);
        assert_eq!(graph.events.len(), 2);
        assert_eq!(graph.total(), 4);

        let era = &graph.eras[0];
        assert_eq!(era.doc.title, "T1");
        assert_eq!(era.doc.description, "D1");
        assert_eq!(era.doc.order, 1);

        let topic = &graph.topics[0];
        assert_eq!(topic.doc.era_id, era.id);
        assert_eq!(topic.doc.order, 1);
        assert_eq!(topic.doc.payload["name"], "Topic A");
        assert!(!topic.doc.payload.contains_key("events"));

        assert_eq!(graph.events[0].doc.topic_id, topic.id);
        assert_eq!(graph.events[0].doc.payload["label"], "E1");
        assert_eq!(graph.events[0].doc.order, 1);
        assert_eq!(graph.events[1].doc.topic_id, topic.id);
        assert_eq!(graph.events[1].doc.payload["label"], "E2");
        assert_eq!(graph.events[1].doc.order, 2);
    }

    #[test]
    fn test_counts_match_source_tree() {
        let source = eras(json!([
            {"title": "A", "description": "a", "topics": [
                {"events": [{}, {}, {}]},
                {"events": [{}]}
            ]},
            {"title": "B", "description": "b", "topics": [
                {"events": []}
            ]}
        ]));
        let graph = build(&source).unwrap();
        assert_eq!(graph.eras.len(), 2);
        assert_eq!(graph.topics.len(), 3);
        assert_eq!(graph.events.len(), 4);
    }

    #[test]
    fn test_order_is_contiguous_per_sibling_group() {
        let source = eras(json!([
            {"title": "A", "description": "a", "topics": [
                {"events": [{}, {}]},
                {"events": [{}, {}, {}]}
            ]},
            {"title": "B", "description": "b", "topics": [{}]}
        ]));
        let graph = build(&source).unwrap();

        let era_orders: Vec<u32> = graph.eras.iter().map(|e| e.doc.order).collect();
        assert_eq!(era_orders, vec![1, 2]);

        // Topics scoped to the first era restart at 1 for the second.
        let first_era = &graph.eras[0].id;
        let orders: Vec<u32> = graph
            .topics
            .iter()
            .filter(|t| &t.doc.era_id == first_era)
            .map(|t| t.doc.order)
            .collect();
        assert_eq!(orders, vec![1, 2]);
        let second_era = &graph.eras[1].id;
        let orders: Vec<u32> = graph
            .topics
            .iter()
            .filter(|t| &t.doc.era_id == second_era)
            .map(|t| t.doc.order)
            .collect();
        assert_eq!(orders, vec![1]);

        // Events scoped to the second topic.
        let second_topic = &graph.topics[1].id;
        let orders: Vec<u32> = graph
            .events
            .iter()
            .filter(|e| &e.doc.topic_id == second_topic)
            .map(|e| e.doc.order)
            .collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_topic_without_events_yields_no_event_records() {
        let source = eras(json!([
            {"title": "A", "description": "a", "topics": [{"name": "quiet"}]}
        ]));
        let graph = build(&source).unwrap();
        assert_eq!(graph.topics.len(), 1);
        assert!(graph.events.is_empty());
    }

    #[test]
    fn test_extra_payload_fields_pass_through() {
        let source = eras(json!([
            {"title": "A", "description": "a", "topics": [
                {"name": "t", "year": 1971, "tags": ["x", "y"],
                 "events": [{"label": "e", "nested": {"k": true}}]}
            ]}
        ]));
        let graph = build(&source).unwrap();
        let topic = &graph.topics[0].doc;
        assert_eq!(topic.payload["year"], 1971);
        assert_eq!(topic.payload["tags"], json!(["x", "y"]));
        let event = &graph.events[0].doc;
        assert_eq!(event.payload["nested"], json!({"k": true}));
    }

    #[test]
    fn test_era_missing_title_is_rejected() {
        let source = eras(json!([{"description": "a", "topics": []}]));
        let err = build(&source).unwrap_err();
        match err {
            MigrateError::MissingField { entity, field, .. } => {
                assert_eq!(entity, "era");
                assert_eq!(field, "title");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn test_era_missing_topics_is_rejected() {
        let source = eras(json!([{"title": "A", "description": "a"}]));
        let err = build(&source).unwrap_err();
        assert!(matches!(
            err,
            MigrateError::MissingField { field: "topics", .. }
        ));
    }

    #[test]
    fn test_non_array_events_is_rejected() {
        let source = eras(json!([
            {"title": "A", "description": "a", "topics": [{"events": "oops"}]}
        ]));
        let err = build(&source).unwrap_err();
        assert!(matches!(
            err,
            MigrateError::MissingField { field: "events", .. }
        ));
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let source = eras(json!([
            {"title": "A", "description": "a", "topics": [{}, {}, {}]}
        ]));
        let graph = build(&source).unwrap();
        let mut ids: Vec<&str> = graph.topics.iter().map(|t| t.id.as_str()).collect();
        ids.push(graph.eras[0].id.as_str());
        let unique: std::collections::HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_serialized_topic_has_camel_case_reference() {
        let source = eras(json!([
            {"title": "A", "description": "a", "topics": [{"name": "t"}]}
        ]));
        let graph = build(&source).unwrap();
        let value = serde_json::to_value(&graph.topics[0].doc).unwrap();
        assert_eq!(value["eraId"], json!(graph.eras[0].id));
        assert_eq!(value["order"], 1);
        assert_eq!(value["name"], "t");
        assert!(value.get("events").is_none());
    }
}
