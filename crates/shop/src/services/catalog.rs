//! Home screen state: catalog listing and derived selections.

use cartwheel_core::{ProductId, UserId};
use rand::seq::SliceRandom;
use tracing::instrument;

use crate::models::{Product, UserProfile};
use crate::repo::{CatalogRepository, UserRepository};

use super::FetchState;

/// How many products the popular strip shows.
const POPULAR_COUNT: usize = 10;
/// How many products the image slider shows.
const SLIDER_COUNT: usize = 5;

/// State holder for the home screen.
pub struct CatalogState {
    catalog: CatalogRepository,
    users: UserRepository,
    state: FetchState,
    products: Vec<Product>,
    categories: Vec<String>,
    popular: Vec<Product>,
    slider: Vec<Product>,
    profile: UserProfile,
    added_notice: bool,
}

impl CatalogState {
    /// Create a home state holder.
    #[must_use]
    pub fn new(catalog: CatalogRepository, users: UserRepository) -> Self {
        Self {
            catalog,
            users,
            state: FetchState::Idle,
            products: Vec::new(),
            categories: Vec::new(),
            popular: Vec::new(),
            slider: Vec::new(),
            profile: UserProfile::default(),
            added_notice: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Current fetch status.
    #[must_use]
    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// The full product list.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The category list; empty until a data source exists.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Random selection for the popular strip.
    #[must_use]
    pub fn popular_products(&self) -> &[Product] {
        &self.popular
    }

    /// Random selection for the image slider.
    #[must_use]
    pub fn image_slider(&self) -> &[Product] {
        &self.slider
    }

    /// The signed-in user's profile, default until fetched.
    #[must_use]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// One-shot flag raised after an add-to-cart completes.
    #[must_use]
    pub fn added_notice(&self) -> bool {
        self.added_notice
    }

    /// Consume the added notice.
    pub fn acknowledge_added(&mut self) {
        self.added_notice = false;
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Load products and categories.
    ///
    /// Per-section failures are logged and swallowed; the screen still
    /// reaches `Success` with whatever sections loaded, matching the
    /// partial-content home layout.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        self.state = FetchState::Loading;
        self.load_products().await;
        self.load_categories().await;
        self.state = FetchState::Success;
    }

    async fn load_products(&mut self) {
        match self.catalog.all_products().await {
            Ok(products) if !products.is_empty() => {
                self.popular = pick_random(&products, POPULAR_COUNT);
                self.slider = pick_random(&products, SLIDER_COUNT);
                self.products = products;
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "product fetch failed"),
        }
    }

    async fn load_categories(&mut self) {
        match self.catalog.categories().await {
            Ok(categories) if !categories.is_empty() => self.categories = categories,
            Ok(_) => {}
            Err(e) => tracing::warn!(error = %e, "category fetch failed"),
        }
    }

    /// Fetch the signed-in user's profile for the greeting header.
    ///
    /// Failures are logged and the default profile kept.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&mut self, user_id: &UserId) {
        match self.users.profile(user_id).await {
            Ok(profile) => self.profile = profile,
            Err(e) => tracing::warn!(%user_id, error = %e, "profile fetch failed"),
        }
    }

    /// Put a product into the cart straight from the listing.
    ///
    /// Raises the one-shot added notice on success; failures are logged.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&mut self, user_id: &UserId, product_id: &ProductId) {
        match self.users.add_to_cart(user_id, product_id).await {
            Ok(()) => self.added_notice = true,
            Err(e) => tracing::warn!(%product_id, error = %e, "add to cart failed"),
        }
    }
}

/// A shuffled selection of at most `count` products.
fn pick_random(products: &[Product], count: usize) -> Vec<Product> {
    let mut picked = products.to_vec();
    picked.shuffle(&mut rand::rng());
    picked.truncate(count);
    picked
}
