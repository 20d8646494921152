use std::path::PathBuf;
use std::sync::Arc;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rouleat::config::{PlacesArgs, PlacesConfig};
use rouleat::models::filter::{CUISINES, DIETARY_RESTRICTIONS};
use rouleat::repositories::blob_store::{BlobStore, FileBlobStore};
use rouleat::repositories::places_gateway::PlacesGateway;
use rouleat::services::address_search::new_session_token;
use rouleat::services::roulette_flow::RouletteFlow;

/// Pick a restaurant near you at random.
#[derive(Parser)]
#[clap(name = "rouleat-cli")]
struct Cli {
    /// Where filters and the last search are kept between runs
    #[clap(env = "ROULEAT_STATE_DIR", long, default_value = ".rouleat")]
    state_dir: PathBuf,
    #[clap(flatten)]
    places: PlacesArgs,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the current filters
    Show,
    /// Toggle a cuisine, "All" toggles every cuisine
    Cuisine { name: String },
    /// Toggle a dietary restriction
    Diet { name: String },
    /// Adjust distance, budget or minimum rating
    Set {
        #[clap(long)]
        radius: Option<f64>,
        #[clap(long)]
        price: Option<u8>,
        #[clap(long)]
        min_rating: Option<f64>,
    },
    /// Search around these coordinates, or forget the location with --clear
    Locate {
        #[clap(long, allow_negative_numbers = true, requires = "lng", required_unless_present = "clear")]
        lat: Option<f64>,
        #[clap(long, allow_negative_numbers = true, requires = "lat", required_unless_present = "clear")]
        lng: Option<f64>,
        #[clap(long, conflicts_with_all = ["lat", "lng"])]
        clear: bool,
    },
    /// Suggest places matching an address
    Address { text: String },
    /// Search around a suggested place
    Place { place_id: String },
    /// Search with the current filters
    Search,
    /// Pick one restaurant from the last search
    Spin,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    rouleat::init_tracing();

    let cli = Cli::parse();
    let gateway = Arc::new(PlacesGateway::new(PlacesConfig::from(&cli.places))?);
    let store: Arc<dyn BlobStore> = Arc::new(FileBlobStore::new(&cli.state_dir)?);

    let mut flow = RouletteFlow::new(gateway.clone(), store);
    flow.start()?;

    match cli.command {
        Command::Show => print_filters(&flow),
        Command::Cuisine { name } => {
            if !is_known(&name, &CUISINES) {
                eprintln!("Unknown cuisine {:?}, pick one of: {}", name, CUISINES.join(", "));
                return Ok(());
            }
            flow.edit().toggle_cuisine(&name);
            print_filters(&flow);
        }
        Command::Diet { name } => {
            if !is_known(&name, &DIETARY_RESTRICTIONS) {
                eprintln!(
                    "Unknown restriction {:?}, pick one of: {}",
                    name,
                    DIETARY_RESTRICTIONS.join(", ")
                );
                return Ok(());
            }
            flow.edit().toggle_dietary_restriction(&name);
            print_filters(&flow);
        }
        Command::Set {
            radius,
            price,
            min_rating,
        } => {
            let filters = flow.edit();
            if let Some(radius) = radius {
                filters.set_radius_km(radius)?;
            }
            if let Some(price) = price {
                filters.set_price_level(price)?;
            }
            if let Some(min_rating) = min_rating {
                filters.set_min_rating(min_rating)?;
            }
            print_filters(&flow);
        }
        Command::Locate { lat, lng, clear } => {
            match (lat, lng) {
                (Some(lat), Some(lng)) if !clear => {
                    flow.edit().set_location_from_coordinates(lat, lng)?
                }
                _ => flow.edit().clear_location(),
            }
            print_filters(&flow);
        }
        Command::Address { text } => {
            let predictions = gateway.autocomplete(&text, &new_session_token()).await?;
            if predictions.is_empty() {
                println!("No places found");
            }
            for prediction in predictions {
                println!("{}  {}", prediction.place_id, prediction.description);
            }
        }
        Command::Place { place_id } => {
            flow.choose_place(&place_id).await?;
            print_filters(&flow);
        }
        Command::Search => {
            let total = flow.submit().await?;
            println!("{} restaurants found", total);
            if let Some(session) = flow.session() {
                for candidate in &session.candidates {
                    println!("  {} ({:.1}★, {})", candidate.name, candidate.rating, candidate.price_label());
                }
            }
        }
        Command::Spin => {
            if !flow.resume_session() {
                println!("Run a search first");
                return Ok(());
            }
            match flow.spin() {
                Some(selection) => {
                    let chosen = &selection.chosen;
                    println!("{}", chosen.name);
                    let location = chosen.coordinates();
                    println!("  {} ({:.5}, {:.5})", chosen.vicinity, location.lat, location.lng);
                    println!(
                        "  {:.1}★ from {} reviews, {}",
                        chosen.rating,
                        chosen.user_ratings_total,
                        chosen.price_label()
                    );
                }
                None => println!("No restaurants to pick from, try widening the filters"),
            }
        }
    }

    Ok(())
}

fn is_known(name: &str, vocabulary: &[&str]) -> bool {
    vocabulary.contains(&name)
}

fn print_filters(flow: &RouletteFlow) {
    let filters = flow.filters();
    let criteria = filters.criteria();

    match (criteria.origin_coordinates, filters.address()) {
        (_, Some(address)) => println!("Location:   {}", address),
        (Some(origin), None) => println!("Location:   {:.4}, {:.4}", origin.lat, origin.lng),
        (None, None) => println!("Location:   None Selected"),
    }
    println!("Distance:   {} km", criteria.radius_km);
    println!("Budget:     {}", "$".repeat(criteria.price_level as usize));
    println!("Min rating: {:.1}+ stars", criteria.min_rating);
    println!("Cuisines:   {}", criteria.selected_cuisines.join(", "));
    println!("Dietary:    {}", criteria.selected_dietary_restrictions.join(", "));
}
