mod fixtures;
mod model;
