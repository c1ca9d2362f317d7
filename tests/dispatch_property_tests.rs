//! Property tests for fallback discovery
//!
//! Discovery must stop at the first module that owns a fragment and probe
//! modules in registry order.

mod common;

use common::*;
use module_views::view::FragmentRequest;
use proptest::prelude::*;

const NAMES: [&str; 6] = ["Billing", "Catalog", "Search", "Reviews", "Shipping", "Accounts"];

fn fixture(module_count: usize, owner: Option<usize>, in_host: bool) -> ViewsFixture {
    let mut builder = ViewsFixture::builder();
    if in_host {
        builder = builder.host_fragment("_Probe", render("<p>Storefront</p>"));
    }
    for (index, name) in NAMES.iter().take(module_count).enumerate() {
        let fragments = if owner == Some(index) {
            vec![("_Probe", render(&format!("<p>{}</p>", name)))]
        } else {
            vec![]
        };
        builder = builder.module(*name, fragments);
    }
    builder.build()
}

proptest! {
    #[test]
    fn test_first_owner_wins(
        module_count in 1usize..=6,
        owner_seed in 0usize..6,
        in_host in any::<bool>(),
    ) {
        let owner = owner_seed % module_count;
        let fx = fixture(module_count, Some(owner), in_host);

        let html = fx
            .views
            .discover_partial_blocking(&fx.context, &FragmentRequest::new("_Probe"))
            .unwrap();

        let mut expected_probes = vec![HOST.to_string()];
        if in_host {
            prop_assert_eq!(html.as_str(), "<p>Storefront</p>");
        } else {
            prop_assert_eq!(html.into_string(), format!("<p>{}</p>", NAMES[owner]));
            expected_probes.extend(NAMES.iter().take(owner + 1).map(|n| n.to_string()));
        }
        prop_assert_eq!(fx.probes(), expected_probes);
    }

    #[test]
    fn test_miss_probes_every_module_once(module_count in 0usize..=6) {
        let fx = fixture(module_count, None, false);

        let err = fx
            .views
            .discover_partial_blocking(&fx.context, &FragmentRequest::new("_Probe"))
            .unwrap_err();

        prop_assert!(err.is_fragment_not_found());
        let probes = fx.probes();
        prop_assert_eq!(probes.len(), module_count + 1);
        prop_assert_eq!(probes[0].as_str(), HOST);
    }
}
