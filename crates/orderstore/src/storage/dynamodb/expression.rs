//! Rendering of conditions and updates to DynamoDB expressions.
//!
//! Attribute names always go through `#nN` placeholders and values through
//! `:vN` placeholders, so reserved words and arbitrary values are safe.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use crate::storage::{Condition, UpdateSpec};

/// Accumulates placeholder names and values while expressions are rendered.
#[derive(Debug, Default)]
pub struct ExpressionBuilder {
    names: HashMap<String, String>,
    placeholders: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl ExpressionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder for an attribute name, reused if the name was seen before.
    fn name(&mut self, attribute: &str) -> String {
        if let Some(placeholder) = self.placeholders.get(attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), attribute.to_string());
        self.placeholders.insert(attribute.to_string(), placeholder.clone());
        placeholder
    }

    fn value(&mut self, value: AttributeValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value);
        placeholder
    }

    /// Renders a condition expression.
    pub fn condition(&mut self, condition: &Condition) -> String {
        match condition {
            Condition::AttributeExists(attribute) => {
                format!("attribute_exists({})", self.name(attribute))
            }
            Condition::AttributeNotExists(attribute) => {
                format!("attribute_not_exists({})", self.name(attribute))
            }
            Condition::Equals(attribute, value) => {
                let name = self.name(attribute);
                let value = self.value(value.clone());
                format!("{name} = {value}")
            }
            Condition::All(conditions) => conditions
                .iter()
                .map(|inner| match inner {
                    Condition::All(_) => format!("({})", self.condition(inner)),
                    _ => self.condition(inner),
                })
                .collect::<Vec<_>>()
                .join(" AND "),
        }
    }

    /// Renders an update expression (`SET ... ADD ...`).
    pub fn update(&mut self, update: &UpdateSpec) -> String {
        let mut clauses = Vec::new();

        if !update.set.is_empty() {
            let assignments: Vec<String> = update
                .set
                .iter()
                .map(|(attribute, value)| {
                    let name = self.name(attribute);
                    let value = self.value(value.clone());
                    format!("{name} = {value}")
                })
                .collect();
            clauses.push(format!("SET {}", assignments.join(", ")));
        }

        if !update.add.is_empty() {
            let increments: Vec<String> = update
                .add
                .iter()
                .map(|(attribute, delta)| {
                    let name = self.name(attribute);
                    let value = self.value(AttributeValue::N(delta.to_string()));
                    format!("{name} {value}")
                })
                .collect();
            clauses.push(format!("ADD {}", increments.join(", ")));
        }

        clauses.join(" ")
    }

    /// Placeholder names, or `None` when nothing was rendered.
    pub fn names(&self) -> Option<HashMap<String, String>> {
        (!self.names.is_empty()).then(|| self.names.clone())
    }

    /// Placeholder values, or `None` when no value was rendered. DynamoDB
    /// rejects an empty value map.
    pub fn values(&self) -> Option<HashMap<String, AttributeValue>> {
        (!self.values.is_empty()).then(|| self.values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_not_exists() {
        let mut builder = ExpressionBuilder::new();
        let expression =
            builder.condition(&Condition::AttributeNotExists("orderId".to_string()));

        assert_eq!(expression, "attribute_not_exists(#n0)");
        assert_eq!(builder.names().unwrap()["#n0"], "orderId");
        assert!(builder.values().is_none());
    }

    #[test]
    fn test_versioned_update_shares_placeholders() {
        let mut builder = ExpressionBuilder::new();
        let update = UpdateSpec::default()
            .set("customerId", AttributeValue::S("foo".to_string()))
            .set("preTaxAmount", AttributeValue::N("4".to_string()))
            .add("version", 1);
        let condition = Condition::All(vec![
            Condition::AttributeExists("orderId".to_string()),
            Condition::Equals("version".to_string(), AttributeValue::N("1".to_string())),
        ]);

        let update_expression = builder.update(&update);
        let condition_expression = builder.condition(&condition);

        assert_eq!(update_expression, "SET #n0 = :v0, #n1 = :v1 ADD #n2 :v2");
        assert_eq!(condition_expression, "attribute_exists(#n3) AND #n2 = :v3");

        let names = builder.names().unwrap();
        assert_eq!(names["#n2"], "version");
        assert_eq!(names["#n3"], "orderId");
        let values = builder.values().unwrap();
        assert_eq!(values[":v2"], AttributeValue::N("1".to_string()));
        assert_eq!(values[":v3"], AttributeValue::N("1".to_string()));
    }

    #[test]
    fn test_repeated_attribute_gets_one_placeholder() {
        let mut builder = ExpressionBuilder::new();
        let condition = Condition::All(vec![
            Condition::AttributeExists("version".to_string()),
            Condition::Equals("version".to_string(), AttributeValue::N("3".to_string())),
        ]);

        let expression = builder.condition(&condition);

        assert_eq!(expression, "attribute_exists(#n0) AND #n0 = :v0");
        assert_eq!(builder.names().unwrap().len(), 1);
    }

    #[test]
    fn test_nested_all_is_parenthesized() {
        let mut builder = ExpressionBuilder::new();
        let condition = Condition::All(vec![
            Condition::AttributeExists("a".to_string()),
            Condition::All(vec![
                Condition::AttributeExists("b".to_string()),
                Condition::AttributeNotExists("c".to_string()),
            ]),
        ]);

        assert_eq!(
            builder.condition(&condition),
            "attribute_exists(#n0) AND (attribute_exists(#n1) AND attribute_not_exists(#n2))"
        );
    }
}
