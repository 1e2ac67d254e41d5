use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(EnumString, VariantArray, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum StoreKey {
    SchemaVersion,
    Settings,
    FilterState,
    SelectedScope,
}
