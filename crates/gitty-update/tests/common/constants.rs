//! Shared constants for test infrastructure

// Version tags
pub const TAG_V1_2_0: &str = "v1.2.0";
pub const TAG_V1_3_0: &str = "v1.3.0";

// Artifact names
pub const ARTIFACT_DARWIN_ARM64: &str = "gitty-darwin-arm64";
pub const ARTIFACT_LINUX_AMD64: &str = "gitty-linux-amd64";

// Binary content for testing
pub const ORIGINAL_BINARY: &[u8] = b"#!/bin/sh\necho gitty v1.2.0\n";
pub const NEW_BINARY: &[u8] = b"#!/bin/sh\necho gitty v1.3.0\n";

// Paths served by the mock server
pub const INDEX_PATH: &str = "/repos/Sunchiii/gitty/releases/latest";

pub const RELEASE_NOTES: &str = "## What's New\n- gitty sync rebases onto develop";
