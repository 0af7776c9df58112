// src/manifest/parse.rs

//! Turning the fields of one job line into a [`JobSpec`].

use thiserror::Error;

use crate::manifest::model::{JobInput, JobOutput, JobSpec};
use crate::manifest::reader::is_blank;

/// Why a job line was rejected. The loader attaches file and line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least 3 fields, found {0}")]
    TooFewFields(usize),
    #[error("the {0} field is empty")]
    EmptyField(&'static str),
    #[error("timeout {0:?} is not a non-negative integer")]
    BadTimeout(String),
}

/// Parse `program,input,output[,timeout][,arg]*`.
pub fn parse_job(fields: &[&str]) -> Result<JobSpec, ParseError> {
    let [program, input, output, rest @ ..] = fields else {
        return Err(ParseError::TooFewFields(fields.len()));
    };

    for (name, value) in [("program", program), ("input", input), ("output", output)] {
        if is_blank(value) {
            return Err(ParseError::EmptyField(name));
        }
    }

    let (timeout, args) = match rest {
        [] => (0, &[][..]),
        [timeout, args @ ..] => (parse_timeout(timeout)?, args),
    };

    Ok(JobSpec {
        program: program.to_string(),
        input: JobInput::from_field(input),
        output: JobOutput::from_field(output),
        timeout,
        args: args.iter().map(|a| a.to_string()).collect(),
    })
}

fn parse_timeout(field: &str) -> Result<u64, ParseError> {
    if is_blank(field) {
        return Ok(0);
    }
    if !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::BadTimeout(field.to_string()));
    }
    // Too large for u64 is still a valid timeout; it is never enforced.
    Ok(field.parse().unwrap_or(u64::MAX))
}
