//! Requests handed to the external image-understanding service.
//!
//! Only the request is built here. Sending it, and what comes back, is up to
//! the caller.

use crate::geometry::{Rect, RoundedRect};

/// The part of the image an analysis is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    WholeImage,
    /// Selection bounds rounded to whole pixels, in drag order.
    Bounds(RoundedRect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisRequest {
    region: Region,
}

impl AnalysisRequest {
    /// Builds a request for the current selection, or for the whole image
    /// when nothing is selected.
    pub fn new(selection: Option<&Rect>) -> Self {
        let region = match selection {
            Some(rect) => Region::Bounds(rect.rounded()),
            None => Region::WholeImage,
        };

        Self { region }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Instruction text sent along with the image.
    pub fn prompt(&self) -> String {
        match self.region {
            Region::WholeImage => "Analyze the provided image in detail. Describe the main \
                subjects, colors, and overall composition."
                .to_string(),
            Region::Bounds(RoundedRect { x, y, x1, y1 }) => format!(
                "Analyze the region bounded by (x: {x}, y: {y}) to (x1: {x1}, y1: {y1}) in the \
                provided image. Describe what is inside this specific area in detail."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt() {
        #[derive(Debug)]
        struct TestCase {
            name: &'static str,
            selection: Option<Rect>,
            expected_region: Region,
            expected_prompt: &'static str,
        }

        let test_cases = [
            TestCase {
                name: "no selection",
                selection: None,
                expected_region: Region::WholeImage,
                expected_prompt: "Analyze the provided image in detail. Describe the main \
                    subjects, colors, and overall composition.",
            },
            TestCase {
                name: "selection is rounded",
                selection: Some(Rect::new(200.2, 99.6, 500.5, 400.0)),
                expected_region: Region::Bounds(RoundedRect {
                    x: 200,
                    y: 100,
                    x1: 501,
                    y1: 400,
                }),
                expected_prompt: "Analyze the region bounded by (x: 200, y: 100) to \
                    (x1: 501, y1: 400) in the provided image. Describe what is inside this \
                    specific area in detail.",
            },
            TestCase {
                name: "inverted selection keeps drag order",
                selection: Some(Rect::new(500.0, 400.0, 200.0, 100.0)),
                expected_region: Region::Bounds(RoundedRect {
                    x: 500,
                    y: 400,
                    x1: 200,
                    y1: 100,
                }),
                expected_prompt: "Analyze the region bounded by (x: 500, y: 400) to \
                    (x1: 200, y1: 100) in the provided image. Describe what is inside this \
                    specific area in detail.",
            },
        ];

        for case in &test_cases {
            let request = AnalysisRequest::new(case.selection.as_ref());

            assert_eq!(
                request.region(),
                case.expected_region,
                "Test '{}' failed: unexpected region",
                case.name
            );
            assert_eq!(
                request.prompt(),
                case.expected_prompt,
                "Test '{}' failed: unexpected prompt",
                case.name
            );
        }
    }
}
