//! `flights` command-line entry point.
//!
//! # Responsibility
//! - Run the HTTP service (`serve`).
//! - Create airports, flights and passengers and manage rosters from the
//!   shell, in place of an admin UI.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use flights_core::db::open_db;
use flights_core::{
    init_logging, AirportRepository, FlightRepository, FlightService, NewAirport, NewFlight,
    NewPassenger, PassengerRepository, SqliteAirportRepository, SqliteFlightRepository,
    SqlitePassengerRepository,
};
use flights_web::{load_config, AppConfig, Server};
use rusqlite::Connection;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "flights", version, about = "Flight booking service")]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Configuration file (defaults to an optional `flights.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite database file; overrides `database.path` from the config.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP routes until interrupted
    Serve {
        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },
    /// Manage airports
    Airport {
        #[command(subcommand)]
        action: AirportAction,
    },
    /// Manage flights
    Flight {
        #[command(subcommand)]
        action: FlightAction,
    },
    /// Manage passengers
    Passenger {
        #[command(subcommand)]
        action: PassengerAction,
    },
    /// Add a passenger to a flight roster
    Book { flight_id: i64, passenger_id: i64 },
    /// Remove a passenger from a flight roster
    Unbook { flight_id: i64, passenger_id: i64 },
}

#[derive(Debug, Subcommand)]
enum AirportAction {
    Add { code: String, city: String },
    List,
    /// Show departures and arrivals of one airport
    Show { code: String },
}

#[derive(Debug, Subcommand)]
enum FlightAction {
    /// Add a flight between two airport codes; duration in minutes
    Add {
        origin: String,
        destination: String,
        #[arg(allow_hyphen_values = true)]
        duration: i64,
    },
    List,
}

#[derive(Debug, Subcommand)]
enum PassengerAction {
    Add { first: String, last: String },
    List,
    /// Show a passenger and the flights they are booked on
    Show { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = load_config(cli.config.as_deref()).context("configuration is malformed")?;
    if let Some(db) = cli.db {
        cfg.database.path = Some(db);
    }
    init_logging(&cfg.logging.level, cfg.logging.dir.as_deref()).map_err(|err| anyhow!(err))?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                cfg.server.port = port;
            }
            Server::new(cfg)?.run().await?;
        }
        Command::Airport { action } => airport(&open(&cfg)?, action)?,
        Command::Flight { action } => flight(&open(&cfg)?, action)?,
        Command::Passenger { action } => passenger(&open(&cfg)?, action)?,
        Command::Book {
            flight_id,
            passenger_id,
        } => {
            let conn = open(&cfg)?;
            let outcome = FlightService::new(SqliteFlightRepository::new(&conn))
                .book(flight_id, passenger_id)?;
            println!("{outcome:?}");
        }
        Command::Unbook {
            flight_id,
            passenger_id,
        } => {
            let conn = open(&cfg)?;
            let outcome = FlightService::new(SqliteFlightRepository::new(&conn))
                .unbook(flight_id, passenger_id)?;
            println!("{outcome:?}");
        }
    }

    Ok(())
}

fn open(cfg: &AppConfig) -> Result<Connection> {
    let Some(path) = &cfg.database.path else {
        bail!("no database file configured; pass --db or set database.path");
    };
    open_db(path).with_context(|| format!("failed to open database `{}`", path.display()))
}

fn airport(conn: &Connection, action: AirportAction) -> Result<()> {
    let repo = SqliteAirportRepository::new(conn);
    match action {
        AirportAction::Add { code, city } => {
            let id = repo.create_airport(&NewAirport::new(code, city))?;
            println!("{id}");
        }
        AirportAction::List => {
            for airport in repo.list_airports()? {
                println!("{}\t{airport}", airport.id);
            }
        }
        AirportAction::Show { code } => {
            let airport = repo
                .get_airport_by_code(&code)?
                .ok_or_else(|| anyhow!("unknown airport code `{code}`"))?;
            println!("{airport}");
            println!("departures:");
            for flight in repo.departures(airport.id)? {
                println!("  {flight}");
            }
            println!("arrivals:");
            for flight in repo.arrivals(airport.id)? {
                println!("  {flight}");
            }
        }
    }
    Ok(())
}

fn flight(conn: &Connection, action: FlightAction) -> Result<()> {
    let repo = SqliteFlightRepository::new(conn);
    match action {
        FlightAction::Add {
            origin,
            destination,
            duration,
        } => {
            let airports = SqliteAirportRepository::new(conn);
            let resolve = |code: &str| -> Result<i64> {
                airports
                    .get_airport_by_code(code)?
                    .map(|airport| airport.id)
                    .ok_or_else(|| anyhow!("unknown airport code `{code}`"))
            };
            let new_flight = NewFlight::new(resolve(&origin)?, resolve(&destination)?, duration);
            let id = repo.create_flight(&new_flight)?;
            println!("{id}");
        }
        FlightAction::List => {
            for flight in repo.list_flights()? {
                let validity = if flight.is_valid_flight() {
                    "valid"
                } else {
                    "invalid"
                };
                println!("{flight}\t{} min\t{validity}", flight.duration);
            }
        }
    }
    Ok(())
}

fn passenger(conn: &Connection, action: PassengerAction) -> Result<()> {
    let repo = SqlitePassengerRepository::new(conn);
    match action {
        PassengerAction::Add { first, last } => {
            let id = repo.create_passenger(&NewPassenger::new(first, last))?;
            println!("{id}");
        }
        PassengerAction::List => {
            for passenger in repo.list_passengers()? {
                println!("{}\t{passenger}", passenger.id);
            }
        }
        PassengerAction::Show { id } => {
            let passenger = repo
                .get_passenger(id)?
                .ok_or_else(|| anyhow!("unknown passenger id {id}"))?;
            println!("{passenger}");
            println!("flights:");
            for flight in repo.flights_for_passenger(id)? {
                println!("  {flight}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, PassengerAction};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn passenger_show_takes_an_id() {
        let cli = Cli::try_parse_from(["flights", "passenger", "show", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Passenger {
                action: PassengerAction::Show { id: 3 }
            }
        ));
    }
}
