//! Connected-component labeling of a mask.
//!
//! Regions are grown from every unvisited covered pixel with an explicit
//! stack, joining 4-connected neighbours. Two blobs whose silhouettes only
//! touch diagonally count as separate shapes.

use crate::mask::Mask;

/// Covered regions of a mask, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Components {
    sizes: Vec<usize>,
}

impl Components {
    /// Number of separate shapes.
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Pixel count of each shape, largest first.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Label the covered regions of `mask`.
pub fn label(mask: &Mask) -> Components {
    let (width, height) = mask.dimensions();
    let (w, h) = (width as usize, height as usize);
    let covered = mask.as_bytes();
    let mut visited = vec![false; w * h];
    let mut stack = Vec::new();
    let mut sizes = Vec::new();

    for start in 0..w * h {
        if visited[start] || covered[start] == 0 {
            continue;
        }

        visited[start] = true;
        stack.push(start);
        let mut size = 0;

        while let Some(i) = stack.pop() {
            size += 1;
            let (x, y) = (i % w, i / w);

            let mut visit = |n: usize| {
                if !visited[n] && covered[n] != 0 {
                    visited[n] = true;
                    stack.push(n);
                }
            };
            if x > 0 {
                visit(i - 1);
            }
            if x + 1 < w {
                visit(i + 1);
            }
            if y > 0 {
                visit(i - w);
            }
            if y + 1 < h {
                visit(i + w);
            }
        }

        sizes.push(size);
    }

    sizes.sort_unstable_by(|a, b| b.cmp(a));
    Components { sizes }
}
