//! Command-line storefront client.
//!
//! Each command maps to a storefront route and its guard requirement. The
//! guard runs against the persisted session before any request; a redirect
//! ends the command with an error naming where the user was sent.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{Level, debug, warn};

use luxury_scents::api::{AddItem, CheckoutRequest, CustomPerfumeDraft, ProfileUpdate};
use luxury_scents::cart;
use luxury_scents::config::{ClientConfig, ConfigError};
use luxury_scents::guard::{Decision, Requirement, enforce};
use luxury_scents::nav::{LOGIN_PATH, MemoryNavigator, Navigator, is_login_path};
use luxury_scents::net::types::{Categoria, MetodoPago, NotaOlfativa, Perfume, User};
use luxury_scents::net::{ApiError, Gateway};
use luxury_scents::session::{FileStore, SessionStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("access to {from} denied; redirected to {to}")]
    Redirected { from: &'static str, to: &'static str },
    #[error("cart has no line with id {0}")]
    NoSuchLine(i64),
}

impl CliError {
    fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Redirected { to, .. } if is_login_path(to) => "Please log in first.".to_owned(),
            Self::Redirected { .. } => "This command requires an administrator account.".to_owned(),
            other => other.to_string(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "luxury-scents", about = "Luxury Scents storefront client")]
struct Cli {
    #[arg(long, env = "LUXURY_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "LUXURY_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        correo: String,
        #[arg(long, env = "LUXURY_PASSWORD")]
        contrasena: String,
    },
    Register {
        nombre: String,
        correo: String,
        #[arg(long, env = "LUXURY_PASSWORD")]
        contrasena: String,
    },
    Logout,
    Whoami,
    Profile(ProfileCommand),
    Perfume(PerfumeCommand),
    Category(CategoryCommand),
    Note(NoteCommand),
    Custom(CustomCommand),
    Cart(CartCommand),
    Checkout {
        #[arg(long)]
        address: String,
        #[arg(long, value_enum, default_value_t = PaymentArg::Tarjeta)]
        payment: PaymentArg,
    },
    Invoice(InvoiceCommand),
    User(UserCommand),
}

#[derive(Args, Debug)]
struct ProfileCommand {
    #[command(subcommand)]
    command: ProfileSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProfileSubcommand {
    Show,
    Update {
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        correo: Option<String>,
        #[arg(long)]
        contrasena: Option<String>,
    },
}

#[derive(Args, Debug)]
struct PerfumeCommand {
    #[command(subcommand)]
    command: PerfumeSubcommand,
}

#[derive(Subcommand, Debug)]
enum PerfumeSubcommand {
    List {
        #[arg(long)]
        category: Option<i64>,
    },
    Search {
        nombre: String,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: i64,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct CategoryCommand {
    #[command(subcommand)]
    command: CategorySubcommand,
}

#[derive(Subcommand, Debug)]
enum CategorySubcommand {
    List,
    Show { id: i64 },
    Create { nombre: String },
    Update { id: i64, nombre: String },
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct NoteCommand {
    #[command(subcommand)]
    command: NoteSubcommand,
}

#[derive(Subcommand, Debug)]
enum NoteSubcommand {
    List,
    Show {
        id: i64,
    },
    Create {
        nombre: String,
        #[arg(long)]
        descripcion: Option<String>,
    },
    Update {
        id: i64,
        nombre: String,
        #[arg(long)]
        descripcion: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct CustomCommand {
    #[command(subcommand)]
    command: CustomSubcommand,
}

#[derive(Subcommand, Debug)]
enum CustomSubcommand {
    Mine,
    Show {
        id: i64,
    },
    Create(CustomDraftArgs),
    Update {
        id: i64,
        #[command(flatten)]
        draft: CustomDraftArgs,
    },
    Delete {
        id: i64,
    },
}

#[derive(Args, Debug)]
struct CustomDraftArgs {
    #[arg(long)]
    nombre: String,
    #[arg(long)]
    descripcion: Option<String>,
    #[arg(long)]
    imagen_url: Option<String>,
    #[arg(long = "nota", help = "Olfactory note id; repeat for several")]
    notas: Vec<i64>,
}

#[derive(Args, Debug)]
struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Subcommand, Debug)]
enum CartSubcommand {
    Show,
    Add {
        perfume_id: i64,
        #[arg(long, default_value_t = 1)]
        cantidad: u32,
    },
    Adjust {
        detalle_id: i64,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
    Remove {
        detalle_id: i64,
    },
}

#[derive(Args, Debug)]
struct InvoiceCommand {
    #[command(subcommand)]
    command: InvoiceSubcommand,
}

#[derive(Subcommand, Debug)]
enum InvoiceSubcommand {
    Mine,
    All,
    Show { id: i64 },
}

#[derive(Args, Debug)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    List,
    Delete { id: i64 },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum PaymentArg {
    Tarjeta,
    Paypal,
    Transferencia,
}

impl From<PaymentArg> for MetodoPago {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Tarjeta => Self::Tarjeta,
            PaymentArg::Paypal => Self::Paypal,
            PaymentArg::Transferencia => Self::Transferencia,
        }
    }
}

impl Command {
    /// Storefront route this command stands in for, and what it requires.
    fn route(&self) -> (&'static str, Requirement) {
        match self {
            Self::Login { .. } => ("/login", Requirement::Public),
            Self::Register { .. } => ("/registro", Requirement::Public),
            Self::Logout => ("/", Requirement::Public),
            Self::Whoami | Self::Profile(_) => ("/perfil", Requirement::Authenticated),
            Self::Perfume(p) => match p.command {
                PerfumeSubcommand::List { .. } | PerfumeSubcommand::Search { .. } => {
                    ("/perfumes", Requirement::Public)
                }
                PerfumeSubcommand::Show { .. } => ("/perfumes/:id", Requirement::Public),
                PerfumeSubcommand::Create { .. } => ("/admin/perfumes/new", Requirement::Admin),
                PerfumeSubcommand::Update { .. } => ("/admin/perfumes/edit/:id", Requirement::Admin),
                PerfumeSubcommand::Delete { .. } => ("/admin/perfumes/delete/:id", Requirement::Admin),
            },
            Self::Category(CategoryCommand { command }) => match command {
                CategorySubcommand::List | CategorySubcommand::Show { .. } => ("/perfumes", Requirement::Public),
                _ => ("/admin", Requirement::Admin),
            },
            Self::Note(NoteCommand { command }) => match command {
                NoteSubcommand::List | NoteSubcommand::Show { .. } => ("/perfumes", Requirement::Public),
                _ => ("/admin", Requirement::Admin),
            },
            Self::Custom(c) => match c.command {
                CustomSubcommand::Mine => ("/mis-perfumes", Requirement::Authenticated),
                CustomSubcommand::Show { .. } => ("/perfumes-personalizados/:id", Requirement::Authenticated),
                CustomSubcommand::Create(_) => ("/crear-personalizado", Requirement::Authenticated),
                CustomSubcommand::Update { .. } => ("/perfumes-personalizados/editar/:id", Requirement::Authenticated),
                CustomSubcommand::Delete { .. } => {
                    ("/perfumes-personalizados/eliminar/:id", Requirement::Authenticated)
                }
            },
            Self::Cart(_) | Self::Checkout { .. } => ("/carrito", Requirement::Authenticated),
            Self::Invoice(i) => match i.command {
                InvoiceSubcommand::All => ("/admin", Requirement::Admin),
                _ => ("/facturas/:id", Requirement::Authenticated),
            },
            Self::User(_) => ("/admin/usuarios", Requirement::Admin),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to load .env: {e}");
        }
    }
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = %e, "command failed");
            eprintln!("error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    let session = SessionStore::new(Arc::new(FileStore::new(config.session_file.clone())));
    let (route, requirement) = cli.command.route();
    let navigator = Arc::new(MemoryNavigator::new(route));
    if let Decision::Redirect(to) = enforce(&session, navigator.as_ref(), requirement) {
        return Err(CliError::Redirected { from: route, to });
    }

    let gateway = Gateway::new(&config, session, navigator.clone())?;
    let result = dispatch(&gateway, cli.command).await;
    if is_login_path(&navigator.current_path()) && !is_login_path(route) {
        warn!(from = route, "session ended during command");
    }
    result
}

async fn dispatch(gateway: &Gateway, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { correo, contrasena } => {
            let user = gateway.auth().login(&correo, &contrasena).await?;
            println!("logged in as {} <{}> ({:?})", user.nombre, user.correo, user.rol);
            Ok(())
        }
        Command::Register { nombre, correo, contrasena } => {
            let user = gateway.auth().register(&nombre, &correo, &contrasena).await?;
            println!("registered {} <{}>", user.nombre, user.correo);
            Ok(())
        }
        Command::Logout => {
            gateway.auth().logout()?;
            println!("logged out");
            Ok(())
        }
        Command::Whoami => print_json(&current_user(gateway)?),
        Command::Profile(profile) => run_profile(gateway, profile).await,
        Command::Perfume(perfume) => run_perfume(gateway, perfume).await,
        Command::Category(CategoryCommand { command }) => run_category(gateway, command).await,
        Command::Note(NoteCommand { command }) => run_note(gateway, command).await,
        Command::Custom(custom) => run_custom(gateway, custom).await,
        Command::Cart(cart) => run_cart(gateway, cart).await,
        Command::Checkout { address, payment } => {
            let request = CheckoutRequest {
                usuario_id: current_user(gateway)?.id,
                direccion_envio: address,
                metodo_pago: payment.into(),
            };
            print_json(&gateway.cart().checkout(&request).await?)
        }
        Command::Invoice(invoice) => run_invoice(gateway, invoice).await,
        Command::User(user) => run_user(gateway, user).await,
    }
}

/// User of the session the guard admitted. Reads storage again, so a
/// session cleared since the guard ran reports as a login redirect.
fn current_user(gateway: &Gateway) -> Result<User, CliError> {
    gateway.session().read().map(|s| s.user).ok_or(CliError::Redirected { from: "/perfil", to: LOGIN_PATH })
}

async fn run_profile(gateway: &Gateway, profile: ProfileCommand) -> Result<(), CliError> {
    match profile.command {
        ProfileSubcommand::Show => print_json(&gateway.users().profile().await?),
        ProfileSubcommand::Update { nombre, correo, contrasena } => {
            let update = ProfileUpdate { nombre, correo, contrasena };
            print_json(&gateway.users().update_profile(&update).await?)
        }
    }
}

async fn run_perfume(gateway: &Gateway, perfume: PerfumeCommand) -> Result<(), CliError> {
    let perfumes = gateway.perfumes();
    match perfume.command {
        PerfumeSubcommand::List { category: Some(id) } => print_json(&perfumes.by_category(id).await?),
        PerfumeSubcommand::List { category: None } => print_json(&perfumes.list().await?),
        PerfumeSubcommand::Search { nombre } => print_json(&perfumes.search(&nombre).await?),
        PerfumeSubcommand::Show { id } => print_json(&perfumes.get(id).await?),
        PerfumeSubcommand::Create { data } => {
            let body = serde_json::from_str::<Perfume>(&data)?;
            print_json(&perfumes.create(&body).await?)
        }
        PerfumeSubcommand::Update { id, data } => {
            let body = serde_json::from_str::<Perfume>(&data)?;
            print_json(&perfumes.update(id, &body).await?)
        }
        PerfumeSubcommand::Delete { id } => {
            perfumes.delete(id).await?;
            println!("deleted perfume {id}");
            Ok(())
        }
    }
}

async fn run_category(gateway: &Gateway, command: CategorySubcommand) -> Result<(), CliError> {
    let categories = gateway.categories();
    match command {
        CategorySubcommand::List => print_json(&categories.list().await?),
        CategorySubcommand::Show { id } => print_json(&categories.get(id).await?),
        CategorySubcommand::Create { nombre } => print_json(&categories.create(&Categoria { id: None, nombre }).await?),
        CategorySubcommand::Update { id, nombre } => {
            print_json(&categories.update(id, &Categoria { id: Some(id), nombre }).await?)
        }
        CategorySubcommand::Delete { id } => {
            categories.delete(id).await?;
            println!("deleted category {id}");
            Ok(())
        }
    }
}

async fn run_note(gateway: &Gateway, command: NoteSubcommand) -> Result<(), CliError> {
    let notes = gateway.notes();
    match command {
        NoteSubcommand::List => print_json(&notes.list().await?),
        NoteSubcommand::Show { id } => print_json(&notes.get(id).await?),
        NoteSubcommand::Create { nombre, descripcion } => {
            print_json(&notes.create(&NotaOlfativa { id: None, nombre, descripcion }).await?)
        }
        NoteSubcommand::Update { id, nombre, descripcion } => {
            print_json(&notes.update(id, &NotaOlfativa { id: Some(id), nombre, descripcion }).await?)
        }
        NoteSubcommand::Delete { id } => {
            notes.delete(id).await?;
            println!("deleted note {id}");
            Ok(())
        }
    }
}

async fn run_custom(gateway: &Gateway, custom: CustomCommand) -> Result<(), CliError> {
    let service = gateway.custom_perfumes();
    match custom.command {
        CustomSubcommand::Mine => print_json(&service.by_user(current_user(gateway)?.id).await?),
        CustomSubcommand::Show { id } => print_json(&service.get(id).await?),
        CustomSubcommand::Create(args) => {
            let draft = draft_from(args, current_user(gateway)?.id);
            print_json(&service.create(&draft).await?)
        }
        CustomSubcommand::Update { id, draft } => {
            let draft = draft_from(draft, current_user(gateway)?.id);
            print_json(&service.update(id, &draft).await?)
        }
        CustomSubcommand::Delete { id } => {
            service.delete(id).await?;
            println!("deleted custom perfume {id}");
            Ok(())
        }
    }
}

fn draft_from(args: CustomDraftArgs, usuario_id: i64) -> CustomPerfumeDraft {
    CustomPerfumeDraft {
        nombre: args.nombre,
        descripcion: args.descripcion,
        imagen_url: args.imagen_url,
        usuario_id: Some(usuario_id),
        notas_ids: args.notas,
    }
}

async fn run_cart(gateway: &Gateway, command: CartCommand) -> Result<(), CliError> {
    let usuario_id = current_user(gateway)?.id;
    let service = gateway.cart();
    match command.command {
        CartSubcommand::Show => {
            let carrito = service.get(usuario_id).await?;
            for line in &carrito.detalles {
                println!(
                    "#{:<6} {:<32} x{:<3} {:>10.2}",
                    line.id,
                    line.product_name(),
                    line.cantidad,
                    cart::line_subtotal(line)
                );
            }
            println!("total: {:.2}", cart::total(&carrito));
            Ok(())
        }
        CartSubcommand::Add { perfume_id, cantidad } => {
            service.add_item(&AddItem { usuario_id, perfume_id, cantidad }).await?;
            println!("added perfume {perfume_id} x{cantidad}");
            Ok(())
        }
        CartSubcommand::Adjust { detalle_id, delta } => {
            let mut carrito = service.get(usuario_id).await?;
            let cantidad =
                cart::adjust_quantity(&mut carrito, detalle_id, delta).ok_or(CliError::NoSuchLine(detalle_id))?;
            service.update_quantity(detalle_id, cantidad).await?;
            println!("line {detalle_id} now x{cantidad}; total: {:.2}", cart::total(&carrito));
            Ok(())
        }
        CartSubcommand::Remove { detalle_id } => {
            let mut carrito = service.get(usuario_id).await?;
            service.remove_item(detalle_id, usuario_id).await?;
            if !cart::remove_line(&mut carrito, detalle_id) {
                warn!(detalle_id, "removed line was not in the fetched cart");
            }
            println!("removed line {detalle_id}; total: {:.2}", cart::total(&carrito));
            Ok(())
        }
    }
}

async fn run_invoice(gateway: &Gateway, invoice: InvoiceCommand) -> Result<(), CliError> {
    let service = gateway.invoices();
    match invoice.command {
        InvoiceSubcommand::Mine => print_json(&service.by_user(current_user(gateway)?.id).await?),
        InvoiceSubcommand::All => print_json(&service.list().await?),
        InvoiceSubcommand::Show { id } => print_json(&service.get(id).await?),
    }
}

async fn run_user(gateway: &Gateway, user: UserCommand) -> Result<(), CliError> {
    match user.command {
        UserSubcommand::List => print_json(&gateway.users().list().await?),
        UserSubcommand::Delete { id } => {
            gateway.users().delete(id).await?;
            println!("deleted user {id}");
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
