// Aggregates all former standalone integration tests as modules.
mod background_sizing;
mod render_lines;
