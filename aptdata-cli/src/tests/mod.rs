//! Shared test harness modules for the aptdata CLI.

use super::*;

mod helpers;
mod load_unit;
