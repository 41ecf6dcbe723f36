use std::env;

use anyhow::{bail, Context, Result};
use ghana_grid::{ConversionRequest, Converter, GeographicInput};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  ghana-grid to-geo <easting_ft> <northing_ft>
  ghana-grid to-grid <latitude> <longitude>

latitude/longitude are decimal degrees or DMS strings such as \"5 36 13.38 N\".
Set RUST_LOG (default: warn) to control logging.";

fn main() -> Result<()> {
    // Logs go to stderr so stdout only carries the result
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let request = parse_request(&args)?;
    debug!(?request, "parsed request");

    let result = Converter::ghana()
        .convert(&request)
        .context("conversion failed")?;
    println!("{result}");

    Ok(())
}

fn parse_request(args: &[String]) -> Result<ConversionRequest> {
    match args {
        [command, easting, northing] if command == "to-geo" => Ok(ConversionRequest::GridToGeo {
            easting: parse_number(easting, "easting")?,
            northing: parse_number(northing, "northing")?,
        }),
        [command, latitude, longitude] if command == "to-grid" => {
            let input = match (latitude.parse::<f64>(), longitude.parse::<f64>()) {
                (Ok(latitude), Ok(longitude)) => GeographicInput::Decimal { latitude, longitude },
                _ => GeographicInput::Dms {
                    latitude_dms: latitude.clone(),
                    longitude_dms: longitude.clone(),
                },
            };
            Ok(ConversionRequest::GeoToGrid { input })
        }
        _ => bail!("{USAGE}"),
    }
}

fn parse_number(value: &str, name: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{name} {value:?} is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn grid_command() {
        let request = parse_request(&args(&["to-geo", "899891.08", "0"])).unwrap();
        assert_eq!(request, ConversionRequest::GridToGeo { easting: 899_891.08, northing: 0.0 });
    }

    #[test]
    fn geographic_command_decimal_and_dms() {
        let request = parse_request(&args(&["to-grid", "5.5", "-0.2"])).unwrap();
        assert_eq!(
            request,
            ConversionRequest::GeoToGrid { input: GeographicInput::Decimal { latitude: 5.5, longitude: -0.2 } }
        );

        let request = parse_request(&args(&["to-grid", "5 30 0 N", "0 12 0 W"])).unwrap();
        assert_eq!(
            request,
            ConversionRequest::GeoToGrid {
                input: GeographicInput::Dms {
                    latitude_dms: "5 30 0 N".to_string(),
                    longitude_dms: "0 12 0 W".to_string(),
                }
            }
        );
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(parse_request(&args(&[])).is_err());
        assert!(parse_request(&args(&["to-geo", "1"])).is_err());
        assert!(parse_request(&args(&["to-geo", "one", "2"])).is_err());
        assert!(parse_request(&args(&["sideways", "1", "2"])).is_err());
    }
}
