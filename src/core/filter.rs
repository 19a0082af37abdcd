use crate::domain::model::{InventoryPolicy, Product};

/// 找出仍允許超賣的 variant，保持商品順序
pub fn qualifying_variant_ids(products: &[Product]) -> Vec<u64> {
    products
        .iter()
        .flat_map(|product| product.variants.iter())
        .filter(|variant| variant.inventory_policy == InventoryPolicy::Continue)
        .map(|variant| variant.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Variant;

    fn product(id: u64, variants: Vec<(u64, InventoryPolicy)>) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            variants: variants
                .into_iter()
                .map(|(id, inventory_policy)| Variant {
                    id,
                    inventory_policy,
                })
                .collect(),
        }
    }

    #[test]
    fn test_filter_keeps_only_continue_variants() {
        let products = vec![
            product(
                1,
                vec![
                    (11, InventoryPolicy::Continue),
                    (12, InventoryPolicy::Deny),
                ],
            ),
            product(2, vec![(21, InventoryPolicy::Deny)]),
            product(3, vec![(31, InventoryPolicy::Continue)]),
        ];

        assert_eq!(qualifying_variant_ids(&products), vec![11, 31]);
    }

    #[test]
    fn test_filter_preserves_product_then_variant_order() {
        let products = vec![
            product(
                2,
                vec![
                    (25, InventoryPolicy::Continue),
                    (21, InventoryPolicy::Continue),
                ],
            ),
            product(1, vec![(15, InventoryPolicy::Continue)]),
        ];

        // No re-sorting: product order first, then variant order within each
        assert_eq!(qualifying_variant_ids(&products), vec![25, 21, 15]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let products = vec![product(
            1,
            vec![
                (11, InventoryPolicy::Continue),
                (12, InventoryPolicy::Deny),
                (13, InventoryPolicy::Continue),
            ],
        )];

        let first = qualifying_variant_ids(&products);
        let second = qualifying_variant_ids(&products);
        assert_eq!(first, second);
    }

    #[test]
    fn test_filter_empty_and_no_qualifying() {
        assert!(qualifying_variant_ids(&[]).is_empty());

        let products = vec![
            product(1, vec![(11, InventoryPolicy::Deny)]),
            product(2, vec![]),
        ];
        assert!(qualifying_variant_ids(&products).is_empty());
    }
}
