//! Mango and mango seed items

use super::config::ItemsConfig;
use level::{ItemStack, Material, NamespacedKey};

pub const NAMESPACE: &str = "mangoplugin";
pub const MANGO_MODEL_DATA: i32 = 1001;
pub const SEED_MODEL_DATA: i32 = 1002;

pub fn mango_key() -> NamespacedKey {
    NamespacedKey::new(NAMESPACE, "mango")
}

pub fn seed_key() -> NamespacedKey {
    NamespacedKey::new(NAMESPACE, "mango_seed")
}

/// Builds and recognises the plugin's items.
///
/// Items are recognised by their tag alone, so renamed or re-lored stacks
/// still count.
#[derive(Debug, Clone)]
pub struct MangoItems {
    mango: ItemStack,
    seed: ItemStack,
}

impl MangoItems {
    pub fn new(config: &ItemsConfig) -> Self {
        let mango = ItemStack::new(Material::Apple, 1)
            .with_display_name(config.mango.name.clone())
            .with_lore(config.mango.lore.clone())
            .with_custom_model_data(MANGO_MODEL_DATA)
            .with_tag(mango_key());

        let seed = ItemStack::new(Material::WheatSeeds, 1)
            .with_display_name(config.mango_seed.name.clone())
            .with_lore(config.mango_seed.lore.clone())
            .with_custom_model_data(SEED_MODEL_DATA)
            .with_tag(seed_key());

        Self { mango, seed }
    }

    /// A single mango
    pub fn mango(&self) -> ItemStack {
        self.mango.clone()
    }

    /// A single mango seed
    pub fn seed(&self) -> ItemStack {
        self.seed.clone()
    }

    pub fn is_mango(&self, item: &ItemStack) -> bool {
        item.has_tag(&mango_key())
    }

    pub fn is_seed(&self, item: &ItemStack) -> bool {
        item.has_tag(&seed_key())
    }
}

impl Default for MangoItems {
    fn default() -> Self {
        Self::new(&ItemsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_carry_tags_and_model_data() {
        let items = MangoItems::default();
        let mango = items.mango();
        let seed = items.seed();

        assert_eq!(mango.material, Material::Apple);
        assert_eq!(mango.custom_model_data, Some(MANGO_MODEL_DATA));
        assert_eq!(mango.display_name.as_deref(), Some("&6Mango"));
        assert!(items.is_mango(&mango));
        assert!(!items.is_seed(&mango));

        assert_eq!(seed.material, Material::WheatSeeds);
        assert_eq!(seed.custom_model_data, Some(SEED_MODEL_DATA));
        assert!(items.is_seed(&seed));
        assert!(!items.is_mango(&seed));
    }

    #[test]
    fn test_plain_items_not_recognised() {
        let items = MangoItems::default();
        let apple = ItemStack::new(Material::Apple, 1).with_display_name("&6Mango");
        assert!(!items.is_mango(&apple));
        assert!(!items.is_seed(&ItemStack::new(Material::WheatSeeds, 3)));
    }

    #[test]
    fn test_recognised_after_rename() {
        let items = MangoItems::default();
        let renamed = items.seed().with_display_name("Pit").with_amount(12);
        assert!(items.is_seed(&renamed));
    }
}
