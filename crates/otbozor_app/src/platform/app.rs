use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use otbozor_client::{
    ApiClient, ApiError, AuthStrategy, EngineHandle, EngineReply, EngineRequest, ListingSearch,
};
use otbozor_core::admin::{self, AdminListingQuery, AdminMsg, AdminState, AdminTab};
use otbozor_core::favorites::{self, FavoritesMsg, FavoritesState};
use otbozor_core::my_listings::{self, MyListingsMsg, MyListingsState};
use otbozor_core::reactivation::{self, ReactivationMsg, ReactivationState};
use otbozor_core::wizard::{self, DraftField, WizardMsg, WizardState, WizardStep};
use otbozor_core::{
    filter_products, Action, Currency, HorseGender, ListingFilter, LocalMedia, MediaKind,
    ProductFilter, ProductRowView, Role,
};
use otbozor_logging::{market_info, market_warn};

use super::cli::{
    AdminCommand, AdminTableArgs, BrowseArgs, Cli, Command, CurrencyArg, GenderArg, ListingArgs,
};
use super::config::{self, AppConfig};
use super::effects::{self, EffectRunner, External};
use super::logging;
use super::persistence::{clear_session, load_session, save_session};
use super::render;

pub fn run_app() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(&cli)?;
    logging::initialize(config.log_destination, cli.verbose);
    market_info!(
        "otbozor starting; api {} state dir {:?}",
        config.api_url,
        config.state_dir
    );
    App::new(config)?.run(cli)
}

pub struct App {
    config: AppConfig,
    engine: EngineHandle,
    timeout: Duration,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let mut settings = config.client_settings();
        if let Some(session) = load_session(&config.state_dir) {
            market_info!(
                "Using saved session of {} (admin: {})",
                session.display_name,
                session.is_admin
            );
            settings.auth = session.auth();
        }
        let api = ApiClient::new(&settings).context("building API client")?;
        let engine = EngineHandle::new(api).context("starting background engine")?;
        // Engine-side timeouts fire first; this only guards against a stuck engine.
        let timeout = settings.request_timeout * 3;
        Ok(Self {
            config,
            engine,
            timeout,
        })
    }

    fn runner(&self) -> EffectRunner<'_> {
        EffectRunner::new(&self.engine, self.timeout)
    }

    pub fn run(&self, cli: Cli) -> Result<()> {
        match cli.command {
            Command::Login { code } => self.login(&code),
            Command::Logout => self.logout(),
            Command::Whoami => self.whoami(),
            Command::Browse(args) => self.browse(args),
            Command::Regions => self.references(true),
            Command::Breeds => self.references(false),
            Command::Districts { region_id } => {
                match fetch(&mut self.runner(), EngineRequest::LoadDistricts { region_id })? {
                    EngineReply::Districts(items) => print!("{}", render::references(&items)),
                    other => unexpected(&other)?,
                }
                Ok(())
            }
            Command::MyListings { filter } => self.my_listings(&filter),
            Command::MyProducts { filter } => self.my_products(&filter),
            Command::Action {
                listing_id,
                action,
                yes,
            } => self.row_action(&listing_id, &action, yes),
            Command::Create(fields) => self.wizard(None, &fields),
            Command::Edit { listing_id, fields } => self.wizard(Some(listing_id), &fields),
            Command::Favorites { page, remove } => self.favorites(page, remove),
            Command::Favorite { listing_id } => {
                fetch(&mut self.runner(), EngineRequest::AddFavorite { listing_id })?;
                println!("Sevimlilarga qo'shildi");
                Ok(())
            }
            Command::Admin(command) => self.admin(command),
        }
    }

    fn login(&self, code: &str) -> Result<()> {
        let reply = fetch(
            &mut self.runner(),
            EngineRequest::VerifyCode {
                code: code.to_string(),
            },
        )?;
        let session = match reply {
            EngineReply::Session(session) => session,
            other => return unexpected(&other),
        };
        if !save_session(&self.config.state_dir, &session) {
            market_warn!("Session could not be saved; the next run will be anonymous");
        }
        self.engine
            .set_auth(AuthStrategy::Bearer(session.access_token.clone()));
        println!("Xush kelibsiz, {}!", session.user.display_name);
        Ok(())
    }

    fn logout(&self) -> Result<()> {
        if let Err(err) = fetch(&mut self.runner(), EngineRequest::Logout) {
            market_warn!("Server logout failed: {err}");
        }
        clear_session(&self.config.state_dir);
        self.engine.set_auth(AuthStrategy::Anonymous);
        println!("Tizimdan chiqildi");
        Ok(())
    }

    fn whoami(&self) -> Result<()> {
        match fetch(&mut self.runner(), EngineRequest::Me)? {
            EngineReply::CurrentUser(user) => {
                let role = if user.is_admin { " (admin)" } else { "" };
                println!("{}{role}", user.display_name);
                Ok(())
            }
            other => unexpected(&other),
        }
    }

    fn browse(&self, args: BrowseArgs) -> Result<()> {
        let search = ListingSearch {
            page: args.page.max(1),
            text: args.search,
            region_id: args.region,
            breed_id: args.breed,
            min_price: args.min_price,
            max_price: args.max_price,
            ..ListingSearch::default()
        };
        match fetch(&mut self.runner(), EngineRequest::Browse(search))? {
            EngineReply::Listings(page) => print!("{}", render::browse(&page, Utc::now())),
            other => unexpected(&other)?,
        }
        Ok(())
    }

    fn references(&self, regions: bool) -> Result<()> {
        let request = EngineRequest::LoadWizardResources { listing_id: None };
        match fetch(&mut self.runner(), request)? {
            EngineReply::WizardResources(resources) => {
                let items = if regions {
                    &resources.regions
                } else {
                    &resources.breeds
                };
                print!("{}", render::references(items));
                Ok(())
            }
            other => unexpected(&other),
        }
    }

    fn my_listings(&self, filter: &str) -> Result<()> {
        let filter: ListingFilter = filter.parse()?;
        let mut runner = self.runner();
        let state = runner.drive(
            MyListingsState::with_filter(filter),
            vec![MyListingsMsg::Opened],
            my_listings::update,
            effects::my_listings_step,
            effects::my_listings_msg,
        );
        print!("{}", render::my_listings(&state.view()));
        Ok(())
    }

    fn my_products(&self, filter: &str) -> Result<()> {
        let filter: ProductFilter = filter.parse()?;
        match fetch(&mut self.runner(), EngineRequest::LoadMyProducts)? {
            EngineReply::MyProducts(products) => {
                let rows: Vec<ProductRowView> = filter_products(&products, filter)
                    .into_iter()
                    .map(|product| ProductRowView::build(product, Role::Owner))
                    .collect();
                print!("{}", render::products(&rows));
                Ok(())
            }
            other => unexpected(&other),
        }
    }

    fn row_action(&self, listing_id: &str, action: &str, yes: bool) -> Result<()> {
        let action =
            Action::from_key(action).ok_or_else(|| anyhow!("unknown action {action:?}"))?;
        let destructive = matches!(action, Action::Delete | Action::Archive);
        if destructive && !yes && !confirm(action.label())? {
            println!("Bekor qilindi");
            return Ok(());
        }

        let mut runner = self.runner();
        let state = runner.drive(
            MyListingsState::new(),
            vec![MyListingsMsg::Opened],
            my_listings::update,
            effects::my_listings_step,
            effects::my_listings_msg,
        );
        if let Some(error) = state.view().error {
            bail!("{error}");
        }
        let allowed = state
            .listings()
            .iter()
            .find(|listing| listing.id == listing_id)
            .map(|listing| otbozor_core::listing_actions(listing, Role::Owner));
        match allowed {
            None => bail!("E'lon {listing_id} topilmadi"),
            Some(actions) if !actions.contains(action) => {
                bail!("{} bu e'lon uchun mavjud emas", action.label())
            }
            Some(_) => {}
        }

        let state = runner.drive(
            state,
            vec![MyListingsMsg::ActionClicked {
                listing_id: listing_id.to_string(),
                action,
            }],
            my_listings::update,
            effects::my_listings_step,
            effects::my_listings_msg,
        );
        if let Some(error) = state.view().error {
            bail!("{error}");
        }
        let external = runner.take_external();
        drop(runner);
        if external.is_empty() {
            println!("{}: bajarildi", action.label());
        }
        for step in external {
            self.follow(step, yes)?;
        }
        Ok(())
    }

    fn follow(&self, step: External, yes: bool) -> Result<()> {
        match step {
            External::OpenCheckout { url } => {
                println!("To'lov sahifasi: {url}");
                Ok(())
            }
            External::OpenWizard { listing_id, finish } => {
                let step = if finish { "yakunlash" } else { "tahrirlash" };
                println!("E'lonni {step} uchun: otbozor edit {listing_id} [--title ...]");
                Ok(())
            }
            External::StartReactivation { listing_id } => self.reactivate(&listing_id, yes),
            External::PayListing { listing_id } => {
                match fetch(
                    &mut self.runner(),
                    EngineRequest::CreateListingInvoice { listing_id },
                )? {
                    EngineReply::Invoice(invoice) => {
                        println!("To'lov sahifasi: {}", invoice.checkout_url)
                    }
                    other => unexpected(&other)?,
                }
                Ok(())
            }
            External::ShowMyListings => self.my_listings(ListingFilter::All.key()),
        }
    }

    fn reactivate(&self, listing_id: &str, yes: bool) -> Result<()> {
        let mut runner = self.runner();
        let state = runner.drive(
            ReactivationState::new(),
            vec![ReactivationMsg::ReactivateClicked {
                listing_id: listing_id.to_string(),
            }],
            reactivation::update,
            effects::reactivation_step,
            effects::reactivation_msg,
        );
        let view = state.view();
        print!("{}", render::reactivation(&view));
        if !view.confirm_enabled {
            bail!(view
                .error
                .unwrap_or_else(|| otbozor_core::FALLBACK_ERROR.to_string()));
        }

        let answer = if yes || confirm("Qayta faollashtirish")? {
            ReactivationMsg::ConfirmClicked
        } else {
            ReactivationMsg::CancelClicked
        };
        let state = runner.drive(
            state,
            vec![answer],
            reactivation::update,
            effects::reactivation_step,
            effects::reactivation_msg,
        );
        if let Some(error) = state.view().error {
            bail!("{error}");
        }
        let external = runner.take_external();
        drop(runner);
        for step in external {
            self.follow(step, yes)?;
        }
        Ok(())
    }

    fn wizard(&self, listing_id: Option<String>, fields: &ListingArgs) -> Result<()> {
        let mut runner = self.runner();
        let mut state = WizardState::new();
        if let Some(id) = &listing_id {
            let request = EngineRequest::LoadWizardResources {
                listing_id: Some(id.clone()),
            };
            let msg = runner.fetch_msg(request, effects::wizard_msg);
            (state, _) = wizard::update(state, msg);
            let view = state.view();
            if let Some(error) = view.error {
                bail!("{error}");
            }
            if view.listing_id.is_none() {
                bail!("E'lon {id} topilmadi");
            }
        }

        let mut msgs: Vec<WizardMsg> = field_changes(fields)
            .into_iter()
            .map(WizardMsg::FieldChanged)
            .collect();
        msgs.extend(
            fields
                .media
                .iter()
                .map(|url| WizardMsg::MediaAdded(local_media(url))),
        );
        state = runner.drive(
            state,
            msgs,
            wizard::update,
            effects::wizard_step,
            effects::wizard_msg,
        );

        // Walk forward one step at a time; stop where a step refuses to advance.
        while state.step() != WizardStep::Review {
            let before = state.step();
            state = runner.drive(
                state,
                vec![WizardMsg::NextClicked],
                wizard::update,
                effects::wizard_step,
                effects::wizard_msg,
            );
            if state.step() == before {
                print!("{}", render::wizard(&state.view()));
                bail!("E'lon {}-qadamda to'xtadi", before.number());
            }
        }

        state = runner.drive(
            state,
            vec![WizardMsg::SubmitClicked],
            wizard::update,
            effects::wizard_step,
            effects::wizard_msg,
        );
        let view = state.view();
        print!("{}", render::wizard(&view));
        if view.outcome.is_none() {
            bail!(view.error.unwrap_or_else(|| otbozor_core::FALLBACK_ERROR.to_string()));
        }

        let external = runner.take_external();
        drop(runner);
        for step in external {
            self.follow(step, false)?;
        }
        Ok(())
    }

    fn favorites(&self, page: usize, remove: Option<String>) -> Result<()> {
        let mut runner = self.runner();
        let state = runner.drive(
            FavoritesState::new(),
            vec![FavoritesMsg::Opened],
            favorites::update,
            effects::favorites_step,
            effects::favorites_msg,
        );
        let mut msgs = Vec::new();
        if let Some(listing_id) = remove {
            msgs.push(FavoritesMsg::RemoveClicked { listing_id });
        }
        msgs.push(FavoritesMsg::PageSelected(page));
        let state = runner.drive(
            state,
            msgs,
            favorites::update,
            effects::favorites_step,
            effects::favorites_msg,
        );
        print!("{}", render::favorites(&state.view()));
        Ok(())
    }

    fn admin(&self, command: AdminCommand) -> Result<()> {
        let (table, action) = match command {
            AdminCommand::Listings(table) => (table, None),
            AdminCommand::Approve { listing_id, table } => {
                (table, Some(AdminMsg::ApproveClicked { listing_id }))
            }
            AdminCommand::Reject {
                listing_id,
                reason,
                table,
            } => (table, Some(AdminMsg::RejectClicked { listing_id, reason })),
            AdminCommand::Delete {
                listing_id,
                yes,
                table,
            } => {
                let confirmed = yes || confirm(Action::Delete.label())?;
                (
                    table,
                    Some(AdminMsg::DeleteClicked {
                        listing_id,
                        confirmed,
                    }),
                )
            }
        };

        // Row actions only apply to rows on the loaded page.
        let mut runner = self.runner();
        let mut state = runner.drive(
            AdminState::with_query(admin_query(&table)?),
            vec![AdminMsg::Opened],
            admin::update,
            effects::admin_step,
            effects::admin_msg,
        );
        if let Some(action) = action {
            state = runner.drive(
                state,
                vec![action],
                admin::update,
                effects::admin_step,
                effects::admin_msg,
            );
        }
        let view = state.view();
        print!("{}", render::admin(&view));
        if let Some(error) = view.error {
            bail!("{error}");
        }
        Ok(())
    }
}

fn fetch(runner: &mut EffectRunner<'_>, request: EngineRequest) -> Result<EngineReply> {
    runner.fetch(request).map_err(explain)
}

fn explain(err: ApiError) -> anyhow::Error {
    if err.is_unauthorized() {
        return anyhow!("{}. Avval kiring: otbozor login <kod>", err.message);
    }
    anyhow!(err)
}

fn unexpected<T>(reply: &EngineReply) -> Result<T> {
    bail!("unexpected reply from engine: {reply:?}")
}

fn confirm(what: &str) -> Result<bool> {
    print!("{what}? [y/N] ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim(), "y" | "Y" | "ha" | "Ha"))
}

pub(crate) fn admin_query(table: &AdminTableArgs) -> Result<AdminListingQuery> {
    let tab: AdminTab = table.tab.parse()?;
    Ok(AdminListingQuery {
        tab,
        page: table.page.max(1),
        region_id: table.region.clone(),
        sale_source: table.sale_source.clone(),
        ..AdminListingQuery::default()
    })
}

pub(crate) fn field_changes(args: &ListingArgs) -> Vec<DraftField> {
    let mut fields = Vec::new();
    if let Some(title) = &args.title {
        fields.push(DraftField::Title(title.clone()));
    }
    if let Some(description) = &args.description {
        fields.push(DraftField::Description(description.clone()));
    }
    if let Some(breed) = &args.breed {
        fields.push(DraftField::Breed(Some(breed.clone())));
    }
    if let Some(gender) = args.gender {
        fields.push(DraftField::Gender(Some(match gender {
            GenderArg::Stallion => HorseGender::Stallion,
            GenderArg::Mare => HorseGender::Mare,
            GenderArg::Gelding => HorseGender::Gelding,
        })));
    }
    if let Some(year) = args.birth_year {
        fields.push(DraftField::BirthYear(Some(year)));
    }
    // Region before district: a region change clears the district.
    if let Some(region) = &args.region {
        fields.push(DraftField::Region(Some(region.clone())));
    }
    if let Some(district) = &args.district {
        fields.push(DraftField::District(Some(district.clone())));
    }
    if let Some(price) = args.price {
        fields.push(DraftField::PriceAmount(Some(price)));
    }
    if let Some(currency) = args.currency {
        fields.push(DraftField::Currency(match currency {
            CurrencyArg::Uzs => Currency::Uzs,
            CurrencyArg::Usd => Currency::Usd,
        }));
    }
    if args.negotiable {
        fields.push(DraftField::Negotiable(true));
    }
    if args.documents {
        fields.push(DraftField::HasDocuments(true));
    }
    fields
}

pub(crate) fn local_media(url: &str) -> LocalMedia {
    let lower = url.to_ascii_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    let kind = match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("mp4" | "mov" | "webm" | "m4v") => MediaKind::Video,
        _ => MediaKind::Image,
    };
    LocalMedia {
        url: url.to_string(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn region_is_applied_before_district() {
        let args = ListingArgs {
            district: Some("d-1".into()),
            region: Some("r-1".into()),
            price: Some(9_000_000),
            ..ListingArgs::default()
        };
        assert_eq!(
            field_changes(&args),
            vec![
                DraftField::Region(Some("r-1".into())),
                DraftField::District(Some("d-1".into())),
                DraftField::PriceAmount(Some(9_000_000)),
            ]
        );
    }

    #[test]
    fn media_kind_follows_the_extension() {
        assert_eq!(local_media("https://cdn.example.uz/a.MP4?x=1").kind, MediaKind::Video);
        assert_eq!(local_media("https://cdn.example.uz/a.jpg").kind, MediaKind::Image);
        assert_eq!(local_media("https://cdn.example.uz/noext").kind, MediaKind::Image);
    }

    #[test]
    fn admin_query_parses_tab_and_clamps_page() {
        let query = admin_query(&AdminTableArgs {
            tab: "Expired".into(),
            page: 0,
            region: Some("r-2".into()),
            sale_source: None,
        })
        .unwrap();
        assert_eq!(query.tab, AdminTab::Expired);
        assert_eq!(query.page, 1);
        assert_eq!(query.cache_key(), "expired:1:r-2:");

        assert!(admin_query(&AdminTableArgs {
            tab: "nope".into(),
            page: 1,
            region: None,
            sale_source: None,
        })
        .is_err());
    }
}
