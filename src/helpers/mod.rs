mod profile_dir;

pub use profile_dir::profile_dir;
