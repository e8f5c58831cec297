// tests/support/mocks/util.rs
use folio_core::application::ports::util::SlugGenerator;
use folio_core::domain::article::services::generate_slug;

#[derive(Clone, Debug, Default)]
pub struct DummySlug;

impl SlugGenerator for DummySlug {
    fn slugify(&self, input: &str) -> String {
        generate_slug(input)
    }
}
