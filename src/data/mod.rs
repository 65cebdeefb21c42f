mod loader;

pub use loader::{
    LoadError, load_bank_from_json, load_surface_list_from_json, load_vocabulary_from_json,
};
