//! Dot-path attribute grouping.
//!
//! Validation attributes arrive as a flat map of dot-paths (`items.*.name`,
//! `address.city`) to rule lists. Schema reconstruction needs them regrouped
//! by their top-level attribute, with enough of the raw sub-path structure
//! kept around to rebuild nested array/object shapes.
//!
//! Order is load-bearing everywhere here: groups appear in first-encounter
//! order of the input map, members keep the input's insertion order, and the
//! first member of a group is its defining member.

use crate::rule::{resolve_type, AttributeType};
use indexmap::IndexMap;

/// One attribute path contributing to a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMember {
    /// The full dot-path as declared (e.g. `items.*.name`)
    pub path: String,
    /// The path split on `.` (e.g. `["items", "*", "name"]`)
    pub segments: Vec<String>,
    /// The rule expressions declared for this path
    pub rules: Vec<String>,
}

impl AttributeMember {
    /// Named sub-path segments below the top-level attribute, with `*` and
    /// numeric index segments removed (e.g. `items.*.name` yields `["name"]`).
    pub fn nested_fields(&self) -> Vec<String> {
        self.segments
            .iter()
            .skip(1)
            .filter(|s| *s != "*" && s.parse::<u64>().is_err())
            .cloned()
            .collect()
    }
}

/// All attribute paths sharing one top-level attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeGroup {
    /// The top-level attribute name (first path segment)
    pub name: String,
    /// Members in input insertion order; the first is the defining member
    pub members: Vec<AttributeMember>,
}

impl AttributeGroup {
    /// The defining member: the first path encountered for this attribute.
    pub fn defining_member(&self) -> &AttributeMember {
        &self.members[0]
    }

    /// The schema type of the group.
    ///
    /// When the defining member is the bare top-level attribute, its rule set
    /// decides the type. When only dot-path members were declared (e.g.
    /// `items.*.name` with no bare `items` rule), the group is an array.
    pub fn resolved_type(&self) -> AttributeType {
        let defining = self.defining_member();
        if defining.path == self.name {
            resolve_type(&defining.rules)
        } else {
            AttributeType::Array
        }
    }

    /// Members that contribute nested structure to an array schema.
    ///
    /// Excludes the defining member only when it is the bare top-level
    /// attribute; a dot-path defining member carries structure itself.
    pub fn nested_members(&self) -> &[AttributeMember] {
        if self.defining_member().path == self.name {
            &self.members[1..]
        } else {
            &self.members[..]
        }
    }
}

/// Groups a flat dot-path rules map by top-level attribute name.
pub fn group_attributes(rules: &IndexMap<String, Vec<String>>) -> Vec<AttributeGroup> {
    let mut groups: IndexMap<String, AttributeGroup> = IndexMap::new();

    for (path, rule_list) in rules {
        let segments: Vec<String> = path.split('.').map(|s| s.to_string()).collect();
        let name = segments[0].clone();

        let member = AttributeMember {
            path: path.clone(),
            segments,
            rules: rule_list.clone(),
        };

        groups
            .entry(name.clone())
            .or_insert_with(|| AttributeGroup {
                name,
                members: Vec::new(),
            })
            .members
            .push(member);
    }

    groups.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_map(entries: &[(&str, &[&str])]) -> IndexMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(path, rules)| {
                (
                    path.to_string(),
                    rules.iter().map(|r| r.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_scalar_attributes_form_singleton_groups() {
        let rules = rules_map(&[
            ("name", &["required", "string"]),
            ("age", &["nullable", "integer"]),
        ]);

        let groups = group_attributes(&rules);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "name");
        assert_eq!(groups[0].members.len(), 1);
        assert_eq!(groups[1].name, "age");
    }

    #[test]
    fn test_dot_paths_group_under_top_level_key() {
        let rules = rules_map(&[
            ("items", &["required", "array"]),
            ("items.*.name", &["required", "string"]),
            ("items.*.age", &["nullable", "integer"]),
            ("title", &["string"]),
        ]);

        let groups = group_attributes(&rules);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "items");
        assert_eq!(groups[0].members.len(), 3);
        assert_eq!(groups[0].defining_member().path, "items");
        assert_eq!(groups[1].name, "title");
    }

    #[test]
    fn test_first_encountered_member_defines_group() {
        // The bare attribute is declared after its wildcard path; the
        // wildcard stays the defining member.
        let rules = rules_map(&[
            ("items.*.name", &["string"]),
            ("items", &["array"]),
        ]);

        let groups = group_attributes(&rules);
        assert_eq!(groups[0].defining_member().path, "items.*.name");
    }

    #[test]
    fn test_resolved_type_from_defining_member() {
        let rules = rules_map(&[("count", &["required", "integer"])]);
        let groups = group_attributes(&rules);
        assert_eq!(groups[0].resolved_type(), AttributeType::Integer);
    }

    #[test]
    fn test_wildcard_only_group_is_array() {
        let rules = rules_map(&[
            ("items.*.name", &["required", "string"]),
            ("items.*.age", &["nullable", "integer"]),
        ]);

        let groups = group_attributes(&rules);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].resolved_type(), AttributeType::Array);
        assert_eq!(groups[0].nested_members().len(), 2);
    }

    #[test]
    fn test_nested_members_skip_bare_defining_member() {
        let rules = rules_map(&[
            ("items", &["array"]),
            ("items.*.name", &["string"]),
        ]);

        let groups = group_attributes(&rules);
        let nested = groups[0].nested_members();
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].path, "items.*.name");
    }

    #[test]
    fn test_nested_fields_strip_wildcards_and_indices() {
        let rules = rules_map(&[
            ("items.*.name", &["string"]),
            ("items.0.id", &["integer"]),
            ("tags.*", &["string"]),
        ]);

        let groups = group_attributes(&rules);

        assert_eq!(groups[0].members[0].nested_fields(), vec!["name"]);
        assert_eq!(groups[0].members[1].nested_fields(), vec!["id"]);
        assert!(groups[1].members[0].nested_fields().is_empty());
    }
}
