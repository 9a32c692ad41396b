// =================================================================
// source/universe.rs - Instrument Universe
// =================================================================

use async_trait::async_trait;
use screener_common::Instrument;

use super::{errors::SourceError, traits::Universe};

/// Twenty large KOSPI constituents by market capitalisation
const KOSPI_TOP20: [(&str, &str); 20] = [
    ("005930", "삼성전자"),
    ("000660", "SK하이닉스"),
    ("373220", "LG에너지솔루션"),
    ("207940", "삼성바이오로직스"),
    ("005380", "현대차"),
    ("000270", "기아"),
    ("068270", "셀트리온"),
    ("005490", "POSCO홀딩스"),
    ("035420", "NAVER"),
    ("006400", "삼성SDI"),
    ("051910", "LG화학"),
    ("003550", "LG"),
    ("000810", "삼성화재"),
    ("035720", "카카오"),
    ("012330", "현대모비스"),
    ("105560", "KB금융"),
    ("055550", "신한지주"),
    ("086790", "하나금융지주"),
    ("032830", "삼성생명"),
    ("009150", "삼성전기"),
];

/// Fixed instrument list
#[derive(Debug, Clone)]
pub struct StaticUniverse {
    instruments: Vec<Instrument>,
}

impl StaticUniverse {
    pub fn kospi_top20() -> Self {
        Self::from_instruments(
            KOSPI_TOP20
                .iter()
                .map(|(code, name)| Instrument::new(*code, *name))
                .collect(),
        )
    }

    pub fn from_instruments(instruments: Vec<Instrument>) -> Self {
        Self { instruments }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }
}

impl Default for StaticUniverse {
    fn default() -> Self {
        Self::kospi_top20()
    }
}

#[async_trait]
impl Universe for StaticUniverse {
    async fn list_symbols(&self) -> Result<Vec<Instrument>, SourceError> {
        Ok(self.instruments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_kospi_top20() {
        let symbols = StaticUniverse::kospi_top20().list_symbols().await.unwrap();

        assert_eq!(symbols.len(), 20);
        assert_eq!(symbols[0], Instrument::new("005930", "삼성전자"));

        let codes: HashSet<_> = symbols.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes.len(), 20);
        assert!(codes.iter().all(|c| c.len() == 6));
    }
}
