use crate::domain::models::{ErrorBody, JsonError, JsonOut};
use crate::error::error_code;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

/// JSON mode reports failures on stdout so callers parse one stream;
/// text mode writes to stderr.
pub fn print_error(json: bool, err: &anyhow::Error) {
    if json {
        let body = JsonError {
            ok: false,
            error: ErrorBody {
                code: error_code(err).to_string(),
                message: format!("{:#}", err),
            },
        };
        match serde_json::to_string_pretty(&body) {
            Ok(s) => println!("{}", s),
            Err(_) => eprintln!("error: {:#}", err),
        }
    } else {
        eprintln!("error: {:#}", err);
    }
}
