//! Per-type field schema: which value slot holds a field's value, by field
//! type discriminator.

use crate::compose::Scalar;
use crate::source::{FieldType, RawField};

use std::collections::BTreeMap;
use std::fmt;

/// One of the `value_*` slots on a raw field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueSlot {
    Int,
    Str,
    GroupId,
    HostId,
    ItemId,
    GraphId,
    SysmapId,
}

impl ValueSlot {
    /// Wire name of the slot.
    pub fn key(self) -> &'static str {
        match self {
            ValueSlot::Int => "value_int",
            ValueSlot::Str => "value_str",
            ValueSlot::GroupId => "value_groupid",
            ValueSlot::HostId => "value_hostid",
            ValueSlot::ItemId => "value_itemid",
            ValueSlot::GraphId => "value_graphid",
            ValueSlot::SysmapId => "value_sysmapid",
        }
    }

    /// Read this slot from a field. `None` if the slot is empty.
    pub fn select(self, field: &RawField) -> Option<Scalar> {
        match self {
            ValueSlot::Int => field.value_int.map(Scalar::Int),
            ValueSlot::Str => field.value_str.clone().map(Scalar::Str),
            ValueSlot::GroupId => field.value_groupid.map(Scalar::Id),
            ValueSlot::HostId => field.value_hostid.map(Scalar::Id),
            ValueSlot::ItemId => field.value_itemid.map(Scalar::Id),
            ValueSlot::GraphId => field.value_graphid.map(Scalar::Id),
            ValueSlot::SysmapId => field.value_sysmapid.map(Scalar::Id),
        }
    }
}

impl fmt::Display for ValueSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSchema {
    slots: BTreeMap<FieldType, ValueSlot>,
}

impl FieldSchema {
    /// Integer and string fields, which every widget type accepts.
    pub fn standard() -> Self {
        Self::default()
            .with(FieldType::INT32, ValueSlot::Int)
            .with(FieldType::STR, ValueSlot::Str)
    }

    pub fn with(mut self, field_type: FieldType, slot: ValueSlot) -> Self {
        self.slots.insert(field_type, slot);
        self
    }

    pub fn slot_for(&self, field_type: FieldType) -> Option<ValueSlot> {
        self.slots.get(&field_type).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ObjectId;

    #[test]
    fn standard_schema_maps_only_scalars() {
        let schema = FieldSchema::standard();
        assert_eq!(schema.slot_for(FieldType::INT32), Some(ValueSlot::Int));
        assert_eq!(schema.slot_for(FieldType::STR), Some(ValueSlot::Str));
        assert_eq!(schema.slot_for(FieldType::ITEM), None);
    }

    #[test]
    fn select_reads_only_the_requested_slot() {
        let field = RawField {
            field_type: FieldType::ITEM,
            name: "itemid".into(),
            value_itemid: Some(ObjectId(23)),
            ..RawField::default()
        };
        assert_eq!(ValueSlot::ItemId.select(&field), Some(Scalar::Id(ObjectId(23))));
        assert_eq!(ValueSlot::HostId.select(&field), None);
    }
}
