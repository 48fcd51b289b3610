pub mod admin;
pub mod donations;
pub mod housing;
pub mod jobs;
pub mod matches;
pub mod stories;

use reqwest::RequestBuilder;

/// Common pagination parameters for all list commands
#[derive(Debug, Default, Clone, Copy)]
pub struct PageParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl PageParams {
    fn apply(&self, mut request: RequestBuilder) -> RequestBuilder {
        if let Some(p) = self.page {
            request = request.query(&[("page", p.to_string())]);
        }
        if let Some(s) = self.page_size {
            request = request.query(&[("page_size", s.to_string())]);
        }
        request
    }
}

/// Add `name=value` to the query string when a value is given.
fn with_param(request: RequestBuilder, name: &str, value: Option<&str>) -> RequestBuilder {
    match value {
        Some(v) if !v.trim().is_empty() => request.query(&[(name, v)]),
        _ => request,
    }
}

fn page_footer(page: usize, total_pages: usize, total_items: usize, noun: &str) -> String {
    format!(
        "Page {} of {} ({} {})",
        page,
        total_pages.max(1),
        total_items,
        noun
    )
}

#[cfg(test)]
pub(crate) mod test_server;

#[cfg(test)]
#[path = "jobs_test.rs"]
mod jobs_test;

#[cfg(test)]
#[path = "housing_test.rs"]
mod housing_test;


#[cfg(test)]
#[path = "donations_test.rs"]
mod donations_test;
