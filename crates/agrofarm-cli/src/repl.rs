//! Interactive prompt. Each input line is parsed as its own command with a
//! multicall clap parser, so `help` and `<command> --help` work as usual.

use std::io::Write as _;

use agrofarm_cart::{CartError, CartStore, CheckoutFlow};
use agrofarm_client::ApiClient;
use agrofarm_core::{
    filter_products, AppConfig, Category, CheckoutField, Credentials, PaymentMethod, Product,
    Role, Session, ValidationError,
};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

#[derive(Debug, Parser)]
#[command(multicall = true)]
pub(crate) struct Line {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Sign in as a farmer
    Login { email: String, password: String },
    /// Sign out and forget the session cookie
    Logout,
    /// Show who is signed in
    Whoami,
    /// Show the signed-in farmer's account
    Profile,
    /// List products other farmers offer to farmers
    FarmProducts,
    /// List the catalog
    Products {
        /// all, fruits, vegetables, crops, pesticides or fertilizer
        #[arg(long, default_value = "all")]
        category: Category,
        /// Case-insensitive match on name, description or category
        #[arg(long)]
        search: Option<String>,
    },
    /// Add a product to the cart
    Add {
        product_id: String,
        #[arg(default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Add a product to the wishlist
    Wishlist { product_id: String },
    /// Re-fetch and show the cart
    Cart,
    /// Retry a failed cart fetch
    Retry,
    /// Set a line's quantity
    Qty {
        product_id: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Increase a line's quantity by one
    Inc { product_id: String },
    /// Decrease a line's quantity by one (removes it at 1)
    Dec { product_id: String },
    /// Remove a line from the cart
    Rm { product_id: String },
    /// Delete the whole cart
    Clear,
    /// Apply a promo code to the totals
    Promo { code: String },
    /// Open the checkout form
    Checkout,
    /// Fill in a checkout field (name, phone, street, city, zip, notes)
    Set {
        field: CheckoutField,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Choose the payment method (cod, easypaisa, jazzcash)
    Pay { method: PaymentMethod },
    /// Place the order
    Submit,
    /// Close the checkout form without ordering
    Cancel,
    /// Leave the prompt
    #[command(alias = "exit")]
    Quit,
}

enum Step {
    Continue,
    Quit,
}

pub(crate) struct App {
    config: AppConfig,
    store: CartStore,
    checkout: CheckoutFlow,
    session: Session,
    catalog: Vec<Product>,
}

impl App {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from `config`.
    pub(crate) fn new(config: AppConfig) -> anyhow::Result<Self> {
        let store = CartStore::new(ApiClient::new(&config)?);
        Ok(Self {
            config,
            store,
            checkout: CheckoutFlow::default(),
            session: Session::default(),
            catalog: Vec::new(),
        })
    }

    /// Reads commands from stdin until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error only if stdin or stdout fail.
    pub(crate) async fn run(&mut self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("{}> ", self.prompt_name());
            std::io::stdout().flush()?;

            let Some(input) = lines.next_line().await? else {
                println!();
                break;
            };
            let words: Vec<&str> = input.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }
            match Line::try_parse_from(words) {
                Ok(Line { command }) => {
                    if let Step::Quit = self.dispatch(command).await? {
                        break;
                    }
                }
                Err(err) => err.print()?,
            }
        }
        Ok(())
    }

    fn prompt_name(&self) -> &str {
        if self.session.is_signed_in() {
            self.session.display_name()
        } else {
            "agrofarm"
        }
    }

    async fn dispatch(&mut self, command: Command) -> anyhow::Result<Step> {
        match command {
            Command::Login { email, password } => self.login(&email, &password).await,
            Command::Logout => self.logout().await?,
            Command::Profile => self.profile().await,
            Command::FarmProducts => self.farm_products().await,
            Command::Whoami => println!("{}", render::whoami(self.session())),
            Command::Products { category, search } => {
                self.products(category, search.as_deref().unwrap_or_default())
                    .await;
            }
            Command::Add {
                product_id,
                quantity,
            } => {
                let result = self.store.add_to_cart(&product_id, quantity).await;
                self.after_cart_action(result);
            }
            Command::Wishlist { product_id } => self.wishlist(&product_id).await,
            Command::Cart => self.show_cart(true).await,
            Command::Retry => {
                let result = self.store.retry().await;
                self.after_cart_action(result);
            }
            Command::Qty {
                product_id,
                quantity,
            } => {
                let result = self.store.update_quantity(&product_id, quantity).await;
                self.after_cart_action(result);
            }
            Command::Inc { product_id } => {
                let result = self.store.increment(&product_id).await;
                self.after_cart_action(result);
            }
            Command::Dec { product_id } => {
                let result = self.store.decrement(&product_id).await;
                self.after_cart_action(result);
            }
            Command::Rm { product_id } => {
                let result = self.store.remove_item(&product_id).await;
                self.after_cart_action(result);
            }
            Command::Clear => {
                let result = self.store.clear_cart().await;
                self.after_cart_action(result);
            }
            Command::Promo { code } => {
                let result = self.store.apply_promo(&code).map(|_| ());
                self.after_cart_action(result);
            }
            Command::Checkout => match self.checkout.open(&self.store) {
                Ok(()) => println!("{}", render::checkout(&self.checkout)),
                Err(err) => println!("\u{2718} {}", err.user_message()),
            },
            Command::Set { field, value } => {
                let value = value.join(" ");
                self.edit_form(|flow| flow.set_field(field, &value));
            }
            Command::Pay { method } => {
                self.edit_form(|flow| flow.set_payment_method(method));
            }
            Command::Submit => self.submit().await,
            Command::Cancel => {
                if self.checkout.cancel() {
                    println!("checkout cancelled");
                } else {
                    println!("checkout is not open");
                }
            }
            Command::Quit => return Ok(Step::Quit),
        }
        Ok(Step::Continue)
    }

    /// Signs in and starts a session. The session profile comes from
    /// `farmers/me` when it answers, else from the login response. Failures
    /// are printed, never fatal.
    pub(crate) async fn login(&mut self, email: &str, password: &str) {
        let credentials = Credentials {
            email: email.trim().to_owned(),
            password: password.to_owned(),
        };
        if let Err(err) = credentials.validate(Role::Farmer) {
            println!("\u{2718} {err}");
            return;
        }
        let response = match self.store.client().login(&credentials).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                println!("\u{2718} {}", err.user_message());
                return;
            }
        };

        let message = response.message.clone();
        let profile = match self.store.client().fetch_profile().await {
            Ok(account) => account.into_profile(&credentials.email, Role::Farmer),
            Err(err) => {
                tracing::warn!(error = %err, "profile fetch failed; using login response");
                response.into_profile(&credentials.email, Role::Farmer)
            }
        };
        tracing::info!(email = %profile.email, "signed in");
        println!(
            "\u{2714} {}",
            message.unwrap_or_else(|| format!("Welcome back, {}", profile.name))
        );
        self.session.sign_in(profile);
    }

    /// Ends the session on the server, then locally. The HTTP client is
    /// rebuilt so the session cookie is dropped along with the rest of the
    /// local state, even if the server call fails.
    pub(crate) async fn logout(&mut self) -> anyhow::Result<()> {
        if !self.session.is_signed_in() {
            println!("not signed in");
            return Ok(());
        }
        if let Err(err) = self.store.client().logout().await {
            tracing::warn!(error = %err, "server logout failed");
            println!("\u{2718} {}", err.user_message());
        }
        self.store = CartStore::new(ApiClient::new(&self.config)?);
        self.checkout = CheckoutFlow::default();
        self.catalog.clear();
        if let Some(profile) = self.session.sign_out() {
            tracing::info!(email = %profile.email, "signed out");
            println!("signed out {}", profile.name);
        }
        Ok(())
    }

    pub(crate) fn session(&self) -> &Session {
        &self.session
    }

    async fn profile(&mut self) {
        match self.store.client().fetch_profile().await {
            Ok(account) => println!("{}", render::account(&account)),
            Err(err) => println!("\u{2718} {}", err.user_message()),
        }
    }

    async fn farm_products(&mut self) {
        match self.store.client().list_farmer_products().await {
            Ok(products) => {
                let all: Vec<&Product> = products.iter().collect();
                println!("{}", render::products(&all));
            }
            Err(err) => println!("\u{2718} {}", err.user_message()),
        }
    }

    pub(crate) async fn show_cart(&mut self, fetch: bool) {
        if fetch {
            if let Err(err) = self.store.fetch_cart().await {
                tracing::debug!(error = %err, "cart unavailable");
            }
        }
        println!("{}", render::cart(&self.store));
    }

    async fn products(&mut self, category: Category, search: &str) {
        if self.catalog.is_empty() {
            match self.store.client().list_products().await {
                Ok(products) => self.catalog = products,
                Err(err) => {
                    tracing::warn!(error = %err, "catalog fetch failed");
                    println!("\u{2718} {}", err.user_message());
                    return;
                }
            }
        }
        let matching = filter_products(&self.catalog, category, search);
        println!("{}", render::products(&matching));
    }

    async fn wishlist(&mut self, product_id: &str) {
        match self.store.client().add_to_wishlist(product_id).await {
            Ok(response) => println!(
                "\u{2714} {}",
                response
                    .message
                    .unwrap_or_else(|| "Added to wishlist".to_string())
            ),
            Err(err) => println!("\u{2718} {}", err.user_message()),
        }
    }

    fn edit_form<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut CheckoutFlow) -> Result<(), CartError>,
    {
        match edit(&mut self.checkout) {
            Ok(()) => println!("{}", render::checkout(&self.checkout)),
            Err(err) => println!("\u{2718} {}", err.user_message()),
        }
    }

    async fn submit(&mut self) {
        match self.checkout.submit(&mut self.store).await {
            Ok(confirmation) => {
                self.print_notices();
                if let Some(id) = confirmation.order.as_ref().and_then(|o| o.id.as_deref()) {
                    println!("order {id}: {}", confirmation.message);
                }
                println!("-> {}", confirmation.redirect.path());
                println!("{}", render::cart(&self.store));
            }
            Err(CartError::Validation(ValidationError::Fields(_))) => {
                println!("{}", render::checkout(&self.checkout));
            }
            Err(err) => {
                tracing::debug!(error = %err, "order not placed");
                self.print_notices();
                if self.checkout.is_open() {
                    println!("{}", render::checkout(&self.checkout));
                } else {
                    println!("\u{2718} {}", err.user_message());
                }
            }
        }
    }

    /// Prints queued notices; on success also the updated cart.
    fn after_cart_action(&mut self, result: Result<(), CartError>) {
        let succeeded = result.is_ok();
        if let Err(err) = result {
            tracing::debug!(error = %err, "cart action did not complete");
        }
        self.print_notices();
        if succeeded {
            println!("{}", render::cart(&self.store));
        }
    }

    fn print_notices(&mut self) {
        let notices = self.store.drain_notices();
        if !notices.is_empty() {
            println!("{}", render::notices(&notices));
        }
    }
}
