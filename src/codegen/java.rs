//! Storage type -> Java type mapping.

use crate::diagram::StorageType;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JavaType {
    pub name: &'static str,
    pub import: Option<&'static str>,
    /// Explicit column definition when the default JPA mapping is wrong for the column.
    pub column_definition: Option<&'static str>,
}

impl JavaType {
    const fn plain(name: &'static str) -> Self {
        JavaType {
            name,
            import: None,
            column_definition: None,
        }
    }

    const fn imported(name: &'static str, import: &'static str) -> Self {
        JavaType {
            name,
            import: Some(import),
            column_definition: None,
        }
    }

    /// Generation strategy for a key of this type; `None` means the key is assigned by the caller.
    pub fn generation_strategy(&self) -> Option<&'static str> {
        match self.name {
            "Long" | "Integer" | "Short" => Some("IDENTITY"),
            "UUID" => Some("AUTO"),
            _ => None,
        }
    }
}

pub fn java_type(storage: StorageType) -> JavaType {
    match storage {
        StorageType::Integer => JavaType::plain("Integer"),
        StorageType::BigInt | StorageType::Serial | StorageType::BigSerial => JavaType::plain("Long"),
        StorageType::SmallInt => JavaType::plain("Short"),
        StorageType::Decimal | StorageType::Numeric => JavaType::imported("BigDecimal", "java.math.BigDecimal"),
        StorageType::Real => JavaType::plain("Float"),
        StorageType::DoublePrecision => JavaType::plain("Double"),
        StorageType::Varchar | StorageType::Char | StorageType::Text => JavaType::plain("String"),
        StorageType::Date => JavaType::imported("LocalDate", "java.time.LocalDate"),
        StorageType::Time => JavaType::imported("LocalTime", "java.time.LocalTime"),
        StorageType::Timestamp => JavaType::imported("LocalDateTime", "java.time.LocalDateTime"),
        StorageType::Boolean => JavaType::plain("Boolean"),
        StorageType::Uuid => JavaType::imported("UUID", "java.util.UUID"),
        StorageType::Json => JavaType {
            name: "String",
            import: None,
            column_definition: Some("json"),
        },
        StorageType::Jsonb => JavaType {
            name: "String",
            import: None,
            column_definition: Some("jsonb"),
        },
        StorageType::Array => JavaType {
            name: "String[]",
            import: None,
            column_definition: Some("text[]"),
        },
    }
}

/// Identity type used by the repository/service/controller layers.
pub const DEFAULT_ID_TYPE: JavaType = JavaType::plain("Long");
