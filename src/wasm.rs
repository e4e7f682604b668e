//! Bindings exposing the solver to the web app, behind the `wasm` feature.
//!
//! The scanner side hands over nested arrays of color ids (top of tube
//! first); the presentation side gets back the reference app's report shape,
//! `{ success: true, steps: [{from, to}, ...] }` or
//! `{ success: false, error: "<reason>" }`.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::builder::LevelBuilder;
use crate::color::ColorId;
use crate::solver::{solve, SolveReport};

/// Solve a scanned level given as an array of tubes, each an array of color
/// ids with the top of the tube first, at the scanned capacity of 4.
///
/// `max_iterations` bounds the search (one iteration per expanded node) so
/// callers can trade completeness for latency;
/// [`DEFAULT_MAX_ITERATIONS`](crate::DEFAULT_MAX_ITERATIONS) is the usual
/// choice.
#[wasm_bindgen]
pub fn solve_level(tubes: &Array, max_iterations: u32) -> Object {
    let mut builder = LevelBuilder::default();
    for tube in tubes.iter() {
        let units = Array::from(&tube)
            .iter()
            .filter_map(|unit| unit.as_f64())
            .map(|unit| unit as ColorId)
            .collect::<Vec<_>>();
        builder.add_tube(units);
    }

    let report = match builder.build() {
        Ok(initial) => SolveReport::from(solve(&initial, max_iterations as usize)),
        Err(_) => SolveReport {
            success: false,
            steps: Vec::new(),
            error: Some("scanned level exceeds tube capacity".to_owned()),
        },
    };

    report_to_js(&report)
}

fn report_to_js(report: &SolveReport) -> Object {
    let out = Object::new();
    let _ = Reflect::set(&out, &"success".into(), &report.success.into());

    match &report.error {
        Some(reason) => {
            let _ = Reflect::set(&out, &"error".into(), &reason.as_str().into());
        }
        None => {
            let steps = Array::new();
            for mv in &report.steps {
                let step = Object::new();
                let _ = Reflect::set(&step, &"from".into(), &(mv.from as u32).into());
                let _ = Reflect::set(&step, &"to".into(), &(mv.to as u32).into());
                steps.push(&step);
            }
            let _ = Reflect::set(&out, &"steps".into(), &steps);
        }
    }

    out
}
