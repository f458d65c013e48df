use std::sync::Arc;
use std::time::Duration;

use common::vertical::Vertical;

use crate::adapter::{AdapterHooks, DefaultHooks, LiveAdapter};
use crate::config::AdapterConfig;
use crate::errors::AdapterError;
use crate::fixture::FixtureAdapter;
use crate::retailers::{
    animates, apple, bargain_chemist, chemist_warehouse, farmers_beauty, farmers_home,
    harvey_norman, heathcotes, jb_hifi, life_pharmacy, mecca, mighty_ape, noel_leeming, pb_tech,
    pet_co_nz, petdirect, sephora, supplements_co_nz, the_warehouse,
};

/// Knobs the CLI layers on top of a retailer's baked-in configuration.
#[derive(Clone, Debug)]
pub struct AdapterRuntimeOptions {
    pub max_products: usize,
    pub request_delay: Duration,
    pub max_fetch_retries: u32,
    pub retry_backoff: Duration,
    pub use_fixture_fallback: bool,
    pub proxy_url: Option<String>,
    pub browser_fallback: bool,
    pub browser_timeout: Duration,
    pub browser_proxy_url: Option<String>,
    /// Selects a retailer's vertical variant (e.g. noel-leeming's whiteware
    /// aisles) when one exists.
    pub vertical: Option<Vertical>,
}

impl Default for AdapterRuntimeOptions {
    fn default() -> Self {
        Self {
            max_products: 120,
            request_delay: Duration::ZERO,
            max_fetch_retries: 2,
            retry_backoff: Duration::from_millis(600),
            use_fixture_fallback: true,
            proxy_url: None,
            browser_fallback: false,
            browser_timeout: Duration::from_secs(30),
            browser_proxy_url: None,
            vertical: None,
        }
    }
}

pub fn known_slugs() -> Vec<&'static str> {
    vec![
        pb_tech::SLUG,
        jb_hifi::SLUG,
        noel_leeming::SLUG,
        harvey_norman::SLUG,
        apple::SLUG,
        heathcotes::SLUG,
        mighty_ape::SLUG,
        the_warehouse::SLUG,
        chemist_warehouse::SLUG,
        bargain_chemist::SLUG,
        life_pharmacy::SLUG,
        mecca::SLUG,
        sephora::SLUG,
        farmers_beauty::SLUG,
        farmers_home::SLUG,
        supplements_co_nz::SLUG,
        animates::SLUG,
        petdirect::SLUG,
        pet_co_nz::SLUG,
    ]
}

fn registry_entry(
    slug: &str,
    vertical: Option<Vertical>,
) -> Option<(AdapterConfig, Arc<dyn AdapterHooks>)> {
    let default_hooks: Arc<dyn AdapterHooks> = Arc::new(DefaultHooks);

    let config = match slug {
        "pb-tech" => pb_tech::config(),
        "jb-hi-fi" => jb_hifi::config(),
        "noel-leeming" => match vertical {
            Some(Vertical::HomeAppliances) => noel_leeming::home_config(),
            _ => noel_leeming::config(),
        },
        "harvey-norman" => harvey_norman::config(),
        "apple" => {
            let apple_hooks: Arc<dyn AdapterHooks> = Arc::new(apple::AppleHooks);
            return Some((apple::config(), apple_hooks));
        }
        "heathcotes" => match vertical {
            Some(Vertical::HomeAppliances) => heathcotes::home_config(),
            _ => heathcotes::config(),
        },
        "mighty-ape" => match vertical {
            Some(Vertical::HomeAppliances) => mighty_ape::home_config(),
            _ => mighty_ape::config(),
        },
        "the-warehouse" => match vertical {
            Some(Vertical::HomeAppliances) => the_warehouse::home_config(),
            _ => the_warehouse::config(),
        },
        "chemist-warehouse" => match vertical {
            Some(Vertical::Supplements) => chemist_warehouse::supplements_config(),
            _ => chemist_warehouse::config(),
        },
        "bargain-chemist" => match vertical {
            Some(Vertical::Supplements) => bargain_chemist::supplements_config(),
            _ => bargain_chemist::config(),
        },
        "life-pharmacy" => life_pharmacy::config(),
        "mecca" => mecca::config(),
        "sephora" => sephora::config(),
        "farmers-beauty" => farmers_beauty::config(),
        "farmers" => farmers_home::config(),
        "supplements-co-nz" => supplements_co_nz::config(),
        "animates" => animates::config(),
        "petdirect" => petdirect::config(),
        "pet-co-nz" => pet_co_nz::config(),
        _ => return None,
    };

    Some((config, default_hooks))
}

/// Builds the live adapter for a retailer with CLI options applied.
pub fn build_live_adapter(
    slug: &str,
    options: &AdapterRuntimeOptions,
) -> Result<LiveAdapter, AdapterError> {
    let Some((mut config, hooks)) = registry_entry(slug, options.vertical) else {
        return Err(AdapterError::UnknownRetailer {
            slug: slug.to_string(),
        });
    };

    config.max_products = options.max_products.max(1);
    config.request_delay = options.request_delay;
    config.max_fetch_retries = options.max_fetch_retries;
    config.retry_backoff = options.retry_backoff;
    config.use_fixture_fallback = options.use_fixture_fallback;
    config.proxy_url = options.proxy_url.clone();
    if options.browser_fallback {
        config.browser_fallback = true;
    }
    config.browser_timeout = options.browser_timeout;
    config.browser_proxy_url = options.browser_proxy_url.clone();

    LiveAdapter::with_hooks(config, hooks)
}

/// Builds the offline fixture adapter for a retailer.
pub fn build_fixture_adapter(
    slug: &str,
    vertical: Option<Vertical>,
) -> Result<FixtureAdapter, AdapterError> {
    let Some((config, _)) = registry_entry(slug, vertical) else {
        return Err(AdapterError::UnknownRetailer {
            slug: slug.to_string(),
        });
    };
    let Some(fixture_name) = config.fallback_fixture else {
        return Err(AdapterError::Fixture {
            path: config.slug.clone(),
            reason: "retailer has no fixture dataset".to_string(),
        });
    };
    Ok(FixtureAdapter::new(
        &config.slug,
        config.vertical,
        &fixture_name,
    ))
}
