// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line argument parsing.

use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Point2;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Floorplan {
        input: PathBuf,
        corners: Option<PathBuf>,
        output: Option<PathBuf>,
    },
    Rectify {
        input: PathBuf,
        corners: [Point2<f64>; 4],
        output: PathBuf,
        size: Option<(u32, u32)>,
    },
    Help,
}

pub const USAGE: &str = "\
Usage:
  arlite floorplan <planes.json> [--corners <corners.json>] [--output <plan.json>]
  arlite rectify <image> --corners x1,y1,x2,y2,x3,y3,x4,y4 [--output <out.png>] [--size WxH]

Options:
  --corners   Corner candidates JSON (floorplan) or four pixel corners (rectify)
  --output    Output file; floorplan writes to stdout when omitted
  --size      Fixed output size for rectify, overrides ARLITE_RECTIFY_WIDTH/HEIGHT

Environment:
  RUST_LOG                 Log filter (default: info,arlite=debug)
  ARLITE_FLOORPLAN_CONFIG  JSON file with floor plan tunables
  ARLITE_RECTIFY_WIDTH     Rectified output width in pixels
  ARLITE_RECTIFY_HEIGHT    Rectified output height in pixels";

/// Parse arguments, excluding the program name
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    match command.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "floorplan" => parse_floorplan(rest),
        "rectify" => parse_rectify(rest),
        other => bail!("Unknown command: {}", other),
    }
}

fn parse_floorplan(args: &[String]) -> Result<Command> {
    let mut input = None;
    let mut corners = None;
    let mut output = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--corners" => corners = Some(PathBuf::from(value(&mut iter, arg)?)),
            "--output" => output = Some(PathBuf::from(value(&mut iter, arg)?)),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            path => input = Some(PathBuf::from(path)),
        }
    }

    Ok(Command::Floorplan {
        input: input.context("Missing plane records file")?,
        corners,
        output,
    })
}

fn parse_rectify(args: &[String]) -> Result<Command> {
    let mut input = None;
    let mut corners = None;
    let mut output = PathBuf::from("rectified.png");
    let mut size = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--corners" => corners = Some(parse_corners(value(&mut iter, arg)?)?),
            "--output" => output = PathBuf::from(value(&mut iter, arg)?),
            "--size" => size = Some(parse_size(value(&mut iter, arg)?)?),
            flag if flag.starts_with("--") => bail!("Unknown option: {}", flag),
            path => input = Some(PathBuf::from(path)),
        }
    }

    Ok(Command::Rectify {
        input: input.context("Missing source image")?,
        corners: corners.context("Missing --corners")?,
        output,
        size,
    })
}

fn value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<&'a str> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| anyhow!("{} needs a value", flag))
}

/// `x1,y1,x2,y2,x3,y3,x4,y4` in source pixels
pub fn parse_corners(s: &str) -> Result<[Point2<f64>; 4]> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().with_context(|| format!("Invalid coordinate: {}", v)))
        .collect::<Result<Vec<_>>>()?;

    if values.len() != 8 {
        bail!("Expected 8 coordinates, got {}", values.len());
    }
    Ok([
        Point2::new(values[0], values[1]),
        Point2::new(values[2], values[3]),
        Point2::new(values[4], values[5]),
        Point2::new(values[6], values[7]),
    ])
}

/// `WxH`, both non-zero
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X']).with_context(|| format!("Invalid size: {}", s))?;
    let w: u32 = w.parse().with_context(|| format!("Invalid width: {}", w))?;
    let h: u32 = h.parse().with_context(|| format!("Invalid height: {}", h))?;
    if w == 0 || h == 0 {
        bail!("Size must be non-zero: {}", s);
    }
    Ok((w, h))
}
