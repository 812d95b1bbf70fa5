//! Pose strings: `key=value` pairs describing initial slider positions
//!
//! Pairs are separated by commas and/or whitespace, keys are the short
//! parameter keys (`rx ry rz tx ty tz`) and every value must fall inside its
//! slider's domain. Keys that are left out keep the value from the base pose.
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, recognize},
    multi::separated_list0,
    number::complete::double,
    sequence::{delimited, separated_pair},
    IResult,
};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::transform::{Param, TransformParams};

#[derive(Debug, Clone, PartialEq)]
pub enum PoseError {
    /// The input is not a list of `key=value` pairs; holds the unparsed rest
    Syntax(String),
    UnknownKey(String),
    Duplicate(Param),
    OutOfRange { param: Param, value: f64 },
}

impl fmt::Display for PoseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoseError::Syntax(rest) if rest.is_empty() => {
                write!(f, "unexpected end of pose")
            }
            PoseError::Syntax(rest) => write!(f, "cannot parse pose at {rest:?}"),
            PoseError::UnknownKey(key) => write!(
                f,
                "unknown pose key {key:?} (expected one of rx, ry, rz, tx, ty, tz)"
            ),
            PoseError::Duplicate(param) => write!(f, "{} given more than once", param.key()),
            PoseError::OutOfRange { param, value } => {
                let (min, max) = param.range();
                write!(f, "{}={value} is outside [{min}, {max}]", param.key())
            }
        }
    }
}

impl std::error::Error for PoseError {}

fn key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_')(input)
}

fn entry(input: &str) -> IResult<&str, (&str, f64)> {
    separated_pair(key, delimited(multispace0, char('='), multispace0), double)(input)
}

fn separator(input: &str) -> IResult<&str, &str> {
    alt((
        recognize(delimited(multispace0, tag(","), multispace0)),
        multispace1,
    ))(input)
}

fn entries(input: &str) -> IResult<&str, Vec<(&str, f64)>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(separator, entry),
        multispace0,
    ))(input)
}

/// Apply a pose string on top of `base`
pub fn apply_pose(base: TransformParams, input: &str) -> Result<TransformParams, PoseError> {
    let (_, pairs) = entries(input).map_err(|e| match e {
        nom::Err::Error(e) | nom::Err::Failure(e) => PoseError::Syntax(e.input.to_string()),
        nom::Err::Incomplete(_) => PoseError::Syntax(String::new()),
    })?;

    let mut params = base;
    let mut seen = HashSet::new();
    for (key, value) in pairs {
        let param = Param::from_key(key).ok_or_else(|| PoseError::UnknownKey(key.to_string()))?;
        if !seen.insert(param) {
            return Err(PoseError::Duplicate(param));
        }
        let (min, max) = param.range();
        if !(min..=max).contains(&value) {
            return Err(PoseError::OutOfRange { param, value });
        }
        params.set(param, value);
    }
    Ok(params)
}

/// Parse a pose string relative to the default slider positions
pub fn parse_pose(input: &str) -> Result<TransformParams, PoseError> {
    apply_pose(TransformParams::default(), input)
}

impl FromStr for TransformParams {
    type Err = PoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pose(s)
    }
}
