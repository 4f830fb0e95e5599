//! Coordinate assignment.
//!
//! Works in an abstract frame where ranks advance along the "main" axis and nodes within a rank
//! are laid out along the "cross" axis, then maps that frame onto x/y for the configured
//! direction. Returned positions are top-left corners.

use crate::model::LayoutOptions;
use sextant_geom::{Point, Size, point};

pub fn assign_coordinates(
    layers: &[Vec<usize>],
    sizes: &[Size],
    options: &LayoutOptions,
) -> Vec<Point> {
    let horizontal = options.direction.is_horizontal();
    let main_extent = |v: usize| if horizontal { sizes[v].width } else { sizes[v].height };
    let cross_extent = |v: usize| if horizontal { sizes[v].height } else { sizes[v].width };

    let mut main = vec![0.0_f64; sizes.len()];
    let mut cross = vec![0.0_f64; sizes.len()];
    let mut layer_widths: Vec<f64> = Vec::with_capacity(layers.len());

    let mut main_cursor = 0.0_f64;
    for (li, layer) in layers.iter().enumerate() {
        if li > 0 {
            main_cursor += options.rank_separation;
        }
        let band = layer.iter().map(|&v| main_extent(v)).fold(0.0_f64, f64::max);

        let mut cursor = 0.0_f64;
        for (i, &v) in layer.iter().enumerate() {
            if i > 0 {
                cursor += options.node_separation;
            }
            cross[v] = cursor;
            cursor += cross_extent(v);
            main[v] = main_cursor + (band - main_extent(v)) / 2.0;
        }
        layer_widths.push(cursor);
        main_cursor += band;
    }
    let total_main = main_cursor;

    let widest = layer_widths.iter().copied().fold(0.0_f64, f64::max);
    for (layer, width) in layers.iter().zip(&layer_widths) {
        let offset = (widest - width) / 2.0;
        for &v in layer {
            cross[v] += offset;
        }
    }

    if options.direction.is_reversed() {
        for layer in layers {
            for &v in layer {
                main[v] = total_main - main[v] - main_extent(v);
            }
        }
    }

    let margin = options.margin;
    let snap = |c: f64| {
        if options.align_to_grid {
            (c / options.grid_size).round() * options.grid_size
        } else {
            c
        }
    };
    (0..sizes.len())
        .map(|v| {
            let (x, y) = if horizontal {
                (main[v], cross[v])
            } else {
                (cross[v], main[v])
            };
            point(snap(x + margin), snap(y + margin))
        })
        .collect()
}
