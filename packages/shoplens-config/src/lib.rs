mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Limits, Ranking, Search};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.search.semantic_limit == 0 {
		return Err(Error::Validation {
			message: "search.semantic_limit must be greater than zero.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.min_similarity) {
		return Err(Error::Validation {
			message: "search.min_similarity must be between 0 and 1.".to_string(),
		});
	}
	if cfg.search.adaptive_result_cap == 0 {
		return Err(Error::Validation {
			message: "search.adaptive_result_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.search.exact_match_limit == 0 {
		return Err(Error::Validation {
			message: "search.exact_match_limit must be greater than zero.".to_string(),
		});
	}

	let weights = [
		("ranking.similarity_weight", cfg.ranking.similarity_weight),
		("ranking.price_weight", cfg.ranking.price_weight),
		("ranking.stock_weight", cfg.ranking.stock_weight),
		("ranking.popularity_weight", cfg.ranking.popularity_weight),
		("ranking.recency_weight", cfg.ranking.recency_weight),
	];

	for (name, weight) in weights {
		if !weight.is_finite() || weight < 0.0 {
			return Err(Error::Validation {
				message: format!("{name} must be a finite number of zero or greater."),
			});
		}
	}
	if weights.iter().map(|(_, weight)| weight).sum::<f32>() <= 0.0 {
		return Err(Error::Validation {
			message: "ranking weights must not all be zero.".to_string(),
		});
	}
	if !cfg.ranking.recency_tau_days.is_finite() || cfg.ranking.recency_tau_days < 0.0 {
		return Err(Error::Validation {
			message: "ranking.recency_tau_days must be a finite number of zero or greater."
				.to_string(),
		});
	}

	if cfg.limits.max_query_chars == 0 {
		return Err(Error::Validation {
			message: "limits.max_query_chars must be greater than zero.".to_string(),
		});
	}
	if cfg.limits.max_search_limit == 0 {
		return Err(Error::Validation {
			message: "limits.max_search_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.limits.default_search_limit == 0
		|| cfg.limits.default_search_limit > cfg.limits.max_search_limit
	{
		return Err(Error::Validation {
			message: "limits.default_search_limit must be between 1 and limits.max_search_limit."
				.to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.limits.default_category_threshold) {
		return Err(Error::Validation {
			message: "limits.default_category_threshold must be between 0 and 1.".to_string(),
		});
	}

	Ok(())
}
