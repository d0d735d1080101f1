use anyhow::Context;
use clap::Parser;
use correios_frete::utils::{logger, validation::Validate};
use correios_frete::{CliConfig, QuoteExecutor, QuoteResult, ReqwestTransport};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting correios-frete");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let config = cli.load_config().context("loading configuration")?;
    let request = match cli.build_request(&config) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{}", e);
            if e.is_input_error() {
                eprintln!("Check the command-line values and try again.");
            }
            std::process::exit(1);
        }
    };

    let transport = ReqwestTransport::from_config(&config)?;
    let executor = QuoteExecutor::from_config(&config, transport);

    let result = match executor.execute(request).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Quote failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if !result.successful {
        std::process::exit(2);
    }

    Ok(())
}

fn print_result(result: &QuoteResult) {
    let service = correios_frete::service::name(&result.service_code).unwrap_or("service");

    if result.successful {
        println!("{} ({})", service, result.service_code);
        println!("  price:          R$ {}", result.price);
        println!("  delivery days:  {}", result.delivery_days);
        println!("  home delivery:  {}", result.home_delivery);
        println!("  saturday:       {}", result.saturday_delivery);
        if !result.error_message.is_empty() {
            println!("  note:           {}", result.error_message);
        }
    } else {
        println!(
            "{} ({}) rejected, code {}: {}",
            service, result.service_code, result.error_code, result.error_message
        );
    }
}
