//! Validation rule grammar and type resolution.
//!
//! Rule expressions are single constraint tokens such as `required`, `string`,
//! or `date_format:Y-m-d`. Each expression is parsed once into a [`RuleKind`]
//! and all resolution is exhaustive case analysis over the parsed kinds; the
//! mapping is deliberately lossy and best-effort, so unknown expressions fall
//! through to [`RuleKind::Other`] and resolve as strings. There are no error
//! paths in this module.

/// A single validation rule expression, parsed into its recognized kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleKind {
    /// The `string` rule
    Str,
    /// The `array` rule
    Array,
    /// The `integer` rule
    Integer,
    /// The `numeric` rule (float or integer)
    Numeric,
    /// The `boolean` rule
    Boolean,
    /// A file-upload constraint (`file`, `image` and variants naming either)
    File,
    /// The `email` rule
    Email,
    /// A generic date rule (`date`, `date_equals:...`)
    Date,
    /// An explicit `date_format:...` rule
    DateFormat,
    /// The `required` rule
    Required,
    /// The `nullable` rule
    Nullable,
    /// Any expression not recognized above, kept verbatim
    Other(String),
}

/// The primitive schema type an attribute resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
}

impl AttributeType {
    /// The OpenAPI `type` keyword for this attribute type
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Integer => "integer",
            AttributeType::Number => "number",
            AttributeType::Boolean => "boolean",
            AttributeType::Array => "array",
        }
    }
}

impl RuleKind {
    /// Parses one rule expression.
    ///
    /// The rule name is everything before the first `:`; arguments are not
    /// interpreted. Names naming `file` or `image` constraints parse as
    /// [`RuleKind::File`] regardless of their exact spelling.
    pub fn parse(expression: &str) -> Self {
        let name = expression.split(':').next().unwrap_or("").trim();

        match name {
            "string" => RuleKind::Str,
            "array" => RuleKind::Array,
            "integer" => RuleKind::Integer,
            "numeric" => RuleKind::Numeric,
            "boolean" => RuleKind::Boolean,
            "email" => RuleKind::Email,
            "date_format" => RuleKind::DateFormat,
            "required" => RuleKind::Required,
            "nullable" => RuleKind::Nullable,
            _ if name.contains("file") || name.contains("image") => RuleKind::File,
            _ if name == "date" || name.starts_with("date_") => RuleKind::Date,
            _ => RuleKind::Other(expression.to_string()),
        }
    }
}

/// Parses every expression of a rule set.
fn parse_all(rules: &[String]) -> Vec<RuleKind> {
    rules.iter().map(|r| RuleKind::parse(r)).collect()
}

/// Resolves the schema type for an attribute from its full rule set.
///
/// First-match priority over the whole set: `string`/file-implying rules win,
/// then `array`, `integer`, `numeric`, `boolean`. Anything else defaults to
/// string.
pub fn resolve_type(rules: &[String]) -> AttributeType {
    let kinds = parse_all(rules);

    if kinds.iter().any(|k| matches!(k, RuleKind::Str | RuleKind::File)) {
        return AttributeType::String;
    }
    if kinds.contains(&RuleKind::Array) {
        return AttributeType::Array;
    }
    if kinds.contains(&RuleKind::Integer) {
        return AttributeType::Integer;
    }
    if kinds.contains(&RuleKind::Numeric) {
        return AttributeType::Number;
    }
    if kinds.contains(&RuleKind::Boolean) {
        return AttributeType::Boolean;
    }

    AttributeType::String
}

/// Resolves the schema format for an attribute.
///
/// File uploads map to `binary`, `email` to `email`, an explicit
/// `date_format` rule to `date`, a generic date rule to `date-time`.
/// Everything else falls back to the resolved type name.
pub fn resolve_format(rules: &[String], attribute_type: AttributeType) -> String {
    let kinds = parse_all(rules);

    if kinds.contains(&RuleKind::File) {
        return "binary".to_string();
    }
    if kinds.contains(&RuleKind::Email) {
        return "email".to_string();
    }
    if kinds.contains(&RuleKind::DateFormat) {
        return "date".to_string();
    }
    if kinds.contains(&RuleKind::Date) {
        return "date-time".to_string();
    }

    attribute_type.as_str().to_string()
}

/// Whether any rule in the set names a `file` or `image` constraint.
pub fn is_file_attribute(rules: &[String]) -> bool {
    rules.iter().any(|r| RuleKind::parse(r) == RuleKind::File)
}

/// Whether the rule set marks the attribute as required.
pub fn is_required(rules: &[String]) -> bool {
    rules.iter().any(|r| RuleKind::parse(r) == RuleKind::Required)
}

/// Whether the rule set marks the attribute as nullable.
pub fn is_nullable(rules: &[String]) -> bool {
    rules.iter().any(|r| RuleKind::parse(r) == RuleKind::Nullable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(exprs: &[&str]) -> Vec<String> {
        exprs.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_parse_simple_kinds() {
        assert_eq!(RuleKind::parse("string"), RuleKind::Str);
        assert_eq!(RuleKind::parse("array"), RuleKind::Array);
        assert_eq!(RuleKind::parse("integer"), RuleKind::Integer);
        assert_eq!(RuleKind::parse("numeric"), RuleKind::Numeric);
        assert_eq!(RuleKind::parse("boolean"), RuleKind::Boolean);
        assert_eq!(RuleKind::parse("email"), RuleKind::Email);
        assert_eq!(RuleKind::parse("required"), RuleKind::Required);
        assert_eq!(RuleKind::parse("nullable"), RuleKind::Nullable);
    }

    #[test]
    fn test_parse_argument_rules() {
        assert_eq!(RuleKind::parse("date_format:Y-m-d"), RuleKind::DateFormat);
        assert_eq!(RuleKind::parse("date_equals:tomorrow"), RuleKind::Date);
        assert_eq!(RuleKind::parse("date"), RuleKind::Date);
    }

    #[test]
    fn test_parse_file_rules() {
        assert_eq!(RuleKind::parse("file"), RuleKind::File);
        assert_eq!(RuleKind::parse("image"), RuleKind::File);
        assert_eq!(RuleKind::parse("image:jpg"), RuleKind::File);
    }

    #[test]
    fn test_parse_unknown_is_other() {
        assert_eq!(
            RuleKind::parse("min:3"),
            RuleKind::Other("min:3".to_string())
        );
        assert_eq!(
            RuleKind::parse("exists:users,id"),
            RuleKind::Other("exists:users,id".to_string())
        );
    }

    #[test]
    fn test_resolve_type_string_wins_over_array() {
        // string is checked before array in the priority list
        let t = resolve_type(&rules(&["array", "string"]));
        assert_eq!(t, AttributeType::String);
    }

    #[test]
    fn test_resolve_type_numeric_is_number() {
        assert_eq!(resolve_type(&rules(&["numeric"])), AttributeType::Number);
        assert_eq!(resolve_type(&rules(&["integer"])), AttributeType::Integer);
    }

    #[test]
    fn test_resolve_type_priority_order() {
        assert_eq!(resolve_type(&rules(&["required", "array"])), AttributeType::Array);
        assert_eq!(
            resolve_type(&rules(&["nullable", "boolean"])),
            AttributeType::Boolean
        );
        assert_eq!(
            resolve_type(&rules(&["integer", "numeric"])),
            AttributeType::Integer
        );
    }

    #[test]
    fn test_resolve_type_file_is_string() {
        assert_eq!(resolve_type(&rules(&["required", "file"])), AttributeType::String);
        assert_eq!(resolve_type(&rules(&["image"])), AttributeType::String);
    }

    #[test]
    fn test_resolve_type_unknown_defaults_to_string() {
        assert_eq!(resolve_type(&rules(&["min:3", "max:10"])), AttributeType::String);
        assert_eq!(resolve_type(&[]), AttributeType::String);
    }

    #[test]
    fn test_resolve_format_binary_for_files() {
        let r = rules(&["required", "file"]);
        assert_eq!(resolve_format(&r, resolve_type(&r)), "binary");
    }

    #[test]
    fn test_resolve_format_email() {
        let r = rules(&["required", "email"]);
        assert_eq!(resolve_format(&r, resolve_type(&r)), "email");
    }

    #[test]
    fn test_resolve_format_date_format_beats_date() {
        let r = rules(&["date", "date_format:Y-m-d"]);
        assert_eq!(resolve_format(&r, resolve_type(&r)), "date");

        let r = rules(&["required", "date"]);
        assert_eq!(resolve_format(&r, resolve_type(&r)), "date-time");
    }

    #[test]
    fn test_resolve_format_falls_back_to_type() {
        let r = rules(&["required", "integer"]);
        assert_eq!(resolve_format(&r, resolve_type(&r)), "integer");
    }

    #[test]
    fn test_is_file_attribute() {
        assert!(is_file_attribute(&rules(&["required", "file"])));
        assert!(is_file_attribute(&rules(&["image:jpg"])));
        assert!(!is_file_attribute(&rules(&["required", "string"])));
    }

    #[test]
    fn test_required_and_nullable() {
        assert!(is_required(&rules(&["required", "string"])));
        assert!(!is_required(&rules(&["nullable", "string"])));
        assert!(is_nullable(&rules(&["nullable", "integer"])));
        assert!(!is_nullable(&rules(&["required"])));
    }
}
