//! Column name to member name conversion.

use serde::{Deserialize, Serialize};

/// How a column storage name maps onto a row's member names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMapping {
    /// `user_count` is looked up as `UserCount`
    #[default]
    UpperCamel,
    /// `user_count` is looked up as `user_count`
    Snake,
}

impl NameMapping {
    pub fn member_name(&self, column: &str) -> String {
        match self {
            NameMapping::UpperCamel => to_camel_case(column),
            NameMapping::Snake => column.to_string(),
        }
    }
}

/// Split on `_` and upper-case the leading ASCII letter of every segment.
///
/// Only a lower-case ASCII first character is changed; everything else is
/// copied through, so `user_ID` becomes `UserID` and `_id` becomes `Id`.
pub fn to_camel_case(column: &str) -> String {
    let mut member = String::with_capacity(column.len());
    for segment in column.split('_') {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            member.push(first.to_ascii_uppercase());
            member.extend(chars);
        }
    }
    member
}
