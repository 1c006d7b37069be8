use crate::shared::*;

/// The farm has one merchant. Sell prices come from each item's definition;
/// the catalog only decides what is on the buy tab.
pub fn populate_shop(catalog: &mut ShopCatalog) {
    catalog.shop_name = "Merchant".into();
    catalog.items = vec![
        "corn_seeds".into(),
        "corn".into(),
        "bottle".into(),
        "water_can".into(),
        "sword".into(),
    ];
}
