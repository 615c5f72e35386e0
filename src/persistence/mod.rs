mod model_store;

pub use model_store::{
    FORMAT_VERSION, ModelSnapshot, StoreError, from_bytes, load_model, save_model, to_bytes,
};
