//! Cross-module tests driving the full engine surface.
