//! quantcore - command-line front end for the pricing core
//!
//! Marshals arguments and configuration into the library structs and prints
//! results as JSON on stdout. Logs go to stderr.
//!
//! # Commands
//!
//! - `quantcore price` - European option, closed form and/or Monte Carlo
//! - `quantcore barrier` - Single-barrier option, closed form and/or Monte Carlo
//! - `quantcore implied-vol` - Black–Scholes implied volatility
//! - `quantcore cap-floor` / `quantcore swap` - Flat-curve rates products
//! - `quantcore calibrate` - SABR fit to a JSON file of implied vols
//! - `quantcore backtest` - EMA/RSI backtest on a CSV or synthetic series

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pricer_core::types::{BarrierDirection, KnockType, MarketParams, OptionType};
use pricer_pricing::mc::McOptions;
use tracing::{debug, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

use config::CliConfig;
pub use error::{CliError, Result};

/// Pricing, calibration and backtesting from the command line
#[derive(Parser)]
#[command(name = "quantcore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "quantcore.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option
    Price {
        #[command(flatten)]
        market: MarketArgs,

        /// Pricing method
        #[arg(short, long, value_enum, default_value_t = Method::Both)]
        method: Method,

        #[command(flatten)]
        mc: McArgs,
    },

    /// Price a single-barrier option
    Barrier {
        #[command(flatten)]
        market: MarketArgs,

        /// Barrier level
        #[arg(long)]
        barrier: f64,

        /// Side of spot the barrier sits on
        #[arg(long, value_enum, default_value_t = DirectionArg::Down)]
        direction: DirectionArg,

        /// Knock-out or knock-in
        #[arg(long, value_enum, default_value_t = KnockArg::Out)]
        knock: KnockArg,

        /// Pricing method
        #[arg(short, long, value_enum, default_value_t = Method::Both)]
        method: Method,

        #[command(flatten)]
        mc: McArgs,
    },

    /// Invert Black–Scholes for the volatility matching a price
    ImpliedVol {
        /// Observed option price
        #[arg(long)]
        price: f64,
        /// Spot price
        #[arg(long)]
        spot: f64,
        /// Strike price
        #[arg(long)]
        strike: f64,
        /// Continuously compounded rate
        #[arg(long, default_value_t = 0.0)]
        rate: f64,
        /// Dividend or foreign yield
        #[arg(long, default_value_t = 0.0)]
        dividend: f64,
        /// Time to expiry in years
        #[arg(long)]
        maturity: f64,
        /// Price a put instead of a call
        #[arg(long)]
        put: bool,
    },

    /// Price a cap or floor with Black-76 on a flat curve
    CapFloor {
        /// Notional
        #[arg(long, default_value_t = 1_000_000.0)]
        notional: f64,
        /// Cap/floor strike rate
        #[arg(long)]
        strike: f64,
        /// Flat forward and discount rate
        #[arg(long)]
        rate: f64,
        /// Black volatility
        #[arg(long)]
        vol: f64,
        /// Tenor in years
        #[arg(long)]
        tenor: f64,
        /// Payments per year
        #[arg(long, default_value_t = pricer_models::instruments::rates::DEFAULT_CAP_FREQUENCY)]
        freq: u32,
        /// Price a floor instead of a cap
        #[arg(long)]
        floor: bool,
    },

    /// Value a pay-fixed swap on a flat curve
    Swap {
        /// Notional
        #[arg(long, default_value_t = 1_000_000.0)]
        notional: f64,
        /// Fixed rate paid
        #[arg(long)]
        fixed: f64,
        /// Flat rate
        #[arg(long)]
        rate: f64,
        /// Tenor in years
        #[arg(long)]
        tenor: f64,
        /// Payments per year
        #[arg(long, default_value_t = pricer_models::instruments::rates::DEFAULT_SWAP_FREQUENCY)]
        freq: u32,
    },

    /// Calibrate SABR to implied vols
    Calibrate {
        /// Forward of the slice
        #[arg(short, long)]
        forward: f64,

        /// JSON array of {"strike", "maturity", "iv"} quotes
        #[arg(short, long)]
        points: PathBuf,

        /// Fixed beta (defaults to [sabr].beta)
        #[arg(long)]
        beta: Option<f64>,

        /// Rounds (defaults to [sabr].rounds)
        #[arg(long)]
        rounds: Option<usize>,

        /// Initial alpha (defaults to the nearest-ATM vol scaled by F^(1-beta))
        #[arg(long)]
        alpha: Option<f64>,

        /// Initial rho
        #[arg(long, default_value_t = 0.0)]
        rho: f64,

        /// Initial nu
        #[arg(long, default_value_t = 0.5)]
        nu: f64,
    },

    /// Backtest an EMA-cross or RSI strategy
    Backtest {
        /// OHLC CSV file (time/date,open,high,low,close)
        #[arg(long, conflicts_with = "synthetic")]
        csv: Option<PathBuf>,

        /// Number of synthetic GBM bars to generate instead of reading a file
        #[arg(long)]
        synthetic: Option<usize>,

        /// Seed for the synthetic series
        #[arg(long, default_value_t = 42)]
        seed: u32,

        /// Strategy (defaults to [backtest].strategy)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Fee per fill (defaults to [backtest].fee)
        #[arg(long)]
        fee: Option<f64>,

        /// Slippage per fill (defaults to [backtest].slippage)
        #[arg(long)]
        slippage: Option<f64>,

        /// Print metrics and trades without the equity curve
        #[arg(long)]
        summary: bool,
    },
}

/// Option market inputs shared by the pricing commands
#[derive(Args, Debug, Clone, Copy)]
struct MarketArgs {
    /// Spot price
    #[arg(long)]
    spot: f64,
    /// Strike price
    #[arg(long)]
    strike: f64,
    /// Continuously compounded rate
    #[arg(long, default_value_t = 0.0)]
    rate: f64,
    /// Dividend or foreign yield
    #[arg(long, default_value_t = 0.0)]
    dividend: f64,
    /// Annualised volatility
    #[arg(long)]
    vol: f64,
    /// Time to expiry in years
    #[arg(long)]
    maturity: f64,
    /// Price a put instead of a call
    #[arg(long)]
    put: bool,
}

impl MarketArgs {
    fn to_params(self) -> MarketParams {
        MarketParams::new(
            self.spot,
            self.strike,
            self.rate,
            self.dividend,
            self.vol,
            self.maturity,
            OptionType::from_is_call(!self.put),
        )
    }
}

/// Monte Carlo overrides on top of `[monte_carlo]`
#[derive(Args, Debug, Clone, Copy)]
struct McArgs {
    /// Number of paths
    #[arg(long)]
    paths: Option<usize>,
    /// Time steps per path
    #[arg(long)]
    steps: Option<usize>,
    /// Generator seed
    #[arg(long)]
    mc_seed: Option<u32>,
    /// Average antithetic path pairs
    #[arg(long)]
    antithetic: bool,
}

impl McArgs {
    fn apply(self, base: &McOptions) -> Result<McOptions> {
        Ok(McOptions::builder()
            .paths(self.paths.unwrap_or(base.paths))
            .steps(self.steps.unwrap_or(base.steps))
            .seed(self.mc_seed.unwrap_or(base.seed))
            .antithetic(self.antithetic || base.antithetic)
            .build()?)
    }
}

/// Which pricer(s) to run
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Closed form only
    Analytic,
    /// Monte Carlo only
    Mc,
    /// Both, for comparison
    Both,
}

impl Method {
    /// Whether the closed form runs.
    pub fn analytic(self) -> bool {
        matches!(self, Method::Analytic | Method::Both)
    }

    /// Whether Monte Carlo runs.
    pub fn monte_carlo(self) -> bool {
        matches!(self, Method::Mc | Method::Both)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum DirectionArg {
    Down,
    Up,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum KnockArg {
    Out,
    In,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum StrategyArg {
    Ema,
    Rsi,
}

fn init_tracing(config: &CliConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(&cli.config)?.with_env_override()?;
    init_tracing(&config, cli.verbose);
    config.validate()?;
    debug!(path = %cli.config.display(), ?config, "Configuration loaded");

    match cli.command {
        Commands::Price { market, method, mc } => {
            let options = mc.apply(&config.monte_carlo)?;
            commands::price::run(&market.to_params(), method, &options)
        }
        Commands::Barrier {
            market,
            barrier,
            direction,
            knock,
            method,
            mc,
        } => {
            let options = mc.apply(&config.monte_carlo)?;
            let direction = match direction {
                DirectionArg::Down => BarrierDirection::Down,
                DirectionArg::Up => BarrierDirection::Up,
            };
            let knock = match knock {
                KnockArg::Out => KnockType::Out,
                KnockArg::In => KnockType::In,
            };
            commands::barrier::run(
                &market.to_params(),
                barrier,
                direction,
                knock,
                method,
                &options,
            )
        }
        Commands::ImpliedVol {
            price,
            spot,
            strike,
            rate,
            dividend,
            maturity,
            put,
        } => commands::price::run_implied_vol(
            price,
            MarketParams::new(
                spot,
                strike,
                rate,
                dividend,
                0.0,
                maturity,
                OptionType::from_is_call(!put),
            ),
        ),
        Commands::CapFloor {
            notional,
            strike,
            rate,
            vol,
            tenor,
            freq,
            floor,
        } => commands::rates::run_cap_floor(notional, strike, rate, vol, tenor, freq, !floor),
        Commands::Swap {
            notional,
            fixed,
            rate,
            tenor,
            freq,
        } => commands::rates::run_swap(notional, fixed, rate, tenor, freq),
        Commands::Calibrate {
            forward,
            points,
            beta,
            rounds,
            alpha,
            rho,
            nu,
        } => commands::calibrate::run(&commands::calibrate::CalibrateRequest {
            forward,
            points: &points,
            beta: beta.unwrap_or(config.sabr.beta),
            rounds: rounds.unwrap_or(config.sabr.rounds),
            alpha,
            rho,
            nu,
        }),
        Commands::Backtest {
            csv,
            synthetic,
            seed,
            strategy,
            fee,
            slippage,
            summary,
        } => {
            let mut params = config.backtest;
            if let Some(strategy) = strategy {
                params.strategy = match strategy {
                    StrategyArg::Ema => pricer_backtest::StrategyKind::EmaCross,
                    StrategyArg::Rsi => pricer_backtest::StrategyKind::Rsi,
                };
            }
            params.fee = fee.unwrap_or(params.fee);
            params.slippage = slippage.unwrap_or(params.slippage);

            let source = match (csv, synthetic) {
                (Some(path), _) => commands::backtest::Source::Csv(path),
                (None, Some(bars)) => commands::backtest::Source::Synthetic { bars, seed },
                (None, None) => commands::backtest::Source::Synthetic {
                    bars: commands::backtest::DEFAULT_SYNTHETIC_BARS,
                    seed,
                },
            };
            info!(strategy = ?params.strategy, "Running backtest");
            commands::backtest::run(&source, &params, summary)
        }
    }
}
