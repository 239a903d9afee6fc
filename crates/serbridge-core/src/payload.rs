//! Payload kinds and value conversions routed through the gateway
//!
//! Every public entry point is the same gateway state machine bound to a
//! fixed callback name. These tables are the single source of that
//! binding; the callback names are the stable registration keys the
//! embedded runtime's startup sequence must use.

/// Payload kinds carried by the encode (`*_bin2json`) and decode
/// (`*_json2bin`) entry-point families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    UserFn,
    UserType,
    Handler,
    DbSchema,
    Oplist,
    Pos,
    Expr,
    ExprWithId,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 8] = [
        PayloadKind::UserFn,
        PayloadKind::UserType,
        PayloadKind::Handler,
        PayloadKind::DbSchema,
        PayloadKind::Oplist,
        PayloadKind::Pos,
        PayloadKind::Expr,
        PayloadKind::ExprWithId,
    ];

    /// Callback name for the binary-to-JSON direction
    pub fn encode_callback(self) -> &'static str {
        match self {
            PayloadKind::UserFn => "user_fn_bin2json",
            PayloadKind::UserType => "user_type_bin2json",
            PayloadKind::Handler => "handler_bin2json",
            PayloadKind::DbSchema => "db_schema_bin2json",
            PayloadKind::Oplist => "oplist_bin2json",
            PayloadKind::Pos => "pos_bin2json",
            PayloadKind::Expr => "expr_bin2json",
            PayloadKind::ExprWithId => "expr_with_id_bin2json",
        }
    }

    /// Callback name for the JSON-to-binary direction
    pub fn decode_callback(self) -> &'static str {
        match self {
            PayloadKind::UserFn => "user_fn_json2bin",
            PayloadKind::UserType => "user_type_json2bin",
            PayloadKind::Handler => "handler_json2bin",
            PayloadKind::DbSchema => "db_schema_json2bin",
            PayloadKind::Oplist => "oplist_json2bin",
            PayloadKind::Pos => "pos_json2bin",
            PayloadKind::Expr => "expr_json2bin",
            PayloadKind::ExprWithId => "expr_with_id_json2bin",
        }
    }
}

/// Value conversions exposed by the binary-safe entry-point family
///
/// These operate on serialized runtime values; inputs and outputs may both
/// contain embedded NUL bytes, so the whole family uses the
/// pointer-plus-length convention in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueOp {
    ToInternalRoundtrippable,
    OfInternalRoundtrippable,
    ToInternalQueryableV0,
    ToInternalQueryableV1,
    OfInternalQueryableV0,
    OfInternalQueryableV1,
    ToDeveloperRepr,
    ToEnduserReadableText,
    ToPrettyMachineJson,
    ToUrlString,
    ToHashableRepr,
    OfUnknownJson,
    HashV0,
    HashV1,
    Execute,
}

impl ValueOp {
    pub const ALL: [ValueOp; 15] = [
        ValueOp::ToInternalRoundtrippable,
        ValueOp::OfInternalRoundtrippable,
        ValueOp::ToInternalQueryableV0,
        ValueOp::ToInternalQueryableV1,
        ValueOp::OfInternalQueryableV0,
        ValueOp::OfInternalQueryableV1,
        ValueOp::ToDeveloperRepr,
        ValueOp::ToEnduserReadableText,
        ValueOp::ToPrettyMachineJson,
        ValueOp::ToUrlString,
        ValueOp::ToHashableRepr,
        ValueOp::OfUnknownJson,
        ValueOp::HashV0,
        ValueOp::HashV1,
        ValueOp::Execute,
    ];

    pub fn callback_name(self) -> &'static str {
        match self {
            ValueOp::ToInternalRoundtrippable => "to_internal_roundtrippable",
            ValueOp::OfInternalRoundtrippable => "of_internal_roundtrippable",
            ValueOp::ToInternalQueryableV0 => "to_internal_queryable_v0",
            ValueOp::ToInternalQueryableV1 => "to_internal_queryable_v1",
            ValueOp::OfInternalQueryableV0 => "of_internal_queryable_v0",
            ValueOp::OfInternalQueryableV1 => "of_internal_queryable_v1",
            ValueOp::ToDeveloperRepr => "to_developer_repr",
            ValueOp::ToEnduserReadableText => "to_enduser_readable_text",
            ValueOp::ToPrettyMachineJson => "to_pretty_machine_json",
            ValueOp::ToUrlString => "to_url_string",
            ValueOp::ToHashableRepr => "to_hashable_repr",
            ValueOp::OfUnknownJson => "of_unknown_json",
            ValueOp::HashV0 => "hash_v0",
            ValueOp::HashV1 => "hash_v1",
            ValueOp::Execute => "execute",
        }
    }
}
