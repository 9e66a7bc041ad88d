use checkout_core::{
    BoxedPricingRule, BuyXGetYFree, Cart, Catalog, Checkout, CheckoutError, FlatUnitPrice,
    InventoryLookup, NForPriceOfM, PricingConfig, PricingRule, Product, Scanner,
};
use std::sync::Arc;

fn store_catalog() -> Catalog {
    Catalog::from_products(vec![
        Product::new("A", 20).unwrap(),
        Product::new("B", 50).unwrap(),
        Product::new("C", 30).unwrap(),
    ])
}

fn quantity(cart: &Cart, id: &str) -> Option<u32> {
    cart.get_item(id).unwrap().map(|item| item.quantity)
}

#[test]
fn test_five_for_three_on_b() {
    let catalog = store_catalog();
    let rules: Vec<BoxedPricingRule> = vec![Arc::new(NForPriceOfM::new("B", 5, 3).unwrap())];
    let scanner = Scanner::with_rules(&catalog, rules).unwrap();

    let mut cart = Cart::from_tokens("ABBACBBAB");
    assert_eq!(quantity(&cart, "A"), Some(3));
    assert_eq!(quantity(&cart, "B"), Some(5));
    assert_eq!(quantity(&cart, "C"), Some(1));

    // 3 x 20 + 1 x 3 x 50 + 1 x 30
    assert_eq!(scanner.scan_items(&mut cart).unwrap(), 240);
    assert!(cart.is_fully_claimed());
}

#[test]
fn test_no_promotions() {
    let catalog = store_catalog();
    let scanner = Scanner::new(&catalog);
    let mut cart = Cart::from_tokens("ABC");

    assert_eq!(scanner.scan_items(&mut cart).unwrap(), 100);
}

#[test]
fn test_buy_three_get_two_free_with_thirteen_b() {
    let catalog = store_catalog();
    let rule = BuyXGetYFree::new("B", 3, 2).unwrap();
    let mut cart = Cart::from_items(vec![("B", 13)]).unwrap();

    assert_eq!(rule.process(&mut cart, &catalog).unwrap(), 300);
    assert_eq!(quantity(&cart, "B"), Some(3));
}

#[test]
fn test_promotion_for_product_missing_from_catalog() {
    let catalog = store_catalog();
    let rule = NForPriceOfM::new("D", 2, 1).unwrap();
    let mut cart = Cart::from_tokens("DDDA");

    assert_eq!(rule.process(&mut cart, &catalog).unwrap(), 0);
    assert_eq!(quantity(&cart, "D"), Some(3));

    // the fallback cannot price D either
    assert_eq!(FlatUnitPrice.process(&mut cart, &catalog).unwrap(), 20);
    assert_eq!(quantity(&cart, "D"), Some(3));
}

#[test]
fn test_every_priced_unit_claimed_exactly_once() {
    let catalog = store_catalog();
    let carts = ["", "A", "BBBBBBBBBBBBB", "CABBAC", "BACABBACBBABBBCBBBA"];

    for tokens in carts {
        let rules: Vec<BoxedPricingRule> = vec![
            Arc::new(BuyXGetYFree::new("B", 3, 2).unwrap()),
            Arc::new(NForPriceOfM::new("A", 3, 2).unwrap()),
        ];
        let scanner = Scanner::with_rules(&catalog, rules).unwrap();
        let mut cart = Cart::from_tokens(tokens);
        let receipt = scanner.scan_with_receipt(&mut cart).unwrap();

        assert!(cart.is_fully_claimed(), "cart {:?}", tokens);
        assert!(receipt.is_complete(), "cart {:?}", tokens);
        assert_eq!(receipt.item_count(), tokens.len() as u64);
    }
}

#[test]
fn test_scanner_lookup_is_passed_to_rules() {
    /// Charges 1 per product the lookup can resolve, without claiming anything
    struct CountResolvable;

    impl PricingRule for CountResolvable {
        fn process(
            &self,
            cart: &mut Cart,
            lookup: &dyn InventoryLookup,
        ) -> checkout_core::CheckoutResult<u64> {
            let mut found = 0;
            for item in cart.items() {
                if lookup.get_product(&item.product_id)?.is_some() {
                    found += 1;
                }
            }
            Ok(found)
        }

        fn name(&self) -> String {
            "count".to_string()
        }
    }

    let catalog = store_catalog();
    let rules: Vec<BoxedPricingRule> = vec![Arc::new(CountResolvable)];
    let scanner = Scanner::with_rules(&catalog, rules).unwrap();

    // 2 resolvable products + 20 + 50 at unit price
    assert_eq!(scanner.scan_items(&mut Cart::from_tokens("ABZ")).unwrap(), 72);
}

#[test]
fn test_checkout_from_toml_config() {
    let config = PricingConfig::from_toml(
        r#"
[[products]]
id = "A"
unit_price = 20

[[products]]
id = "B"
unit_price = 50

[[products]]
id = "C"
unit_price = 30

[[rules]]
kind = "n_for_price_of_m"
product_id = "B"
total = 5
paid = 3
"#,
    )
    .unwrap();
    let checkout = Checkout::from_config(&config).unwrap();

    assert_eq!(checkout.checkout("ABBACBBAB").unwrap(), 240);
    assert_eq!(checkout.checkout("ABC").unwrap(), 100);
}

#[test]
fn test_checkout_price_overflow_is_error() {
    let config = PricingConfig::from_toml(
        r#"
[[products]]
id = "A"
unit_price = 9223372036854775807
"#,
    )
    .unwrap();
    let checkout = Checkout::from_config(&config).unwrap();

    assert_eq!(checkout.checkout("A").unwrap(), 9_223_372_036_854_775_807);
    assert!(matches!(
        checkout.checkout("AAA"),
        Err(CheckoutError::PriceOverflow(_))
    ));
    assert!(matches!(
        checkout.checkout_receipt("AAA"),
        Err(CheckoutError::PriceOverflow(_))
    ));
}
