/// Unit tests for the public record model API
mod record_model;
