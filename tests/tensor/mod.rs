// Tensor (flat-backed multidimensional buffer) tests
mod indexing;
