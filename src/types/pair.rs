use super::{
    amount::CurrencyAmount,
    asset::Asset,
    error::InvalidPair,
    grammar::is_xrp_code,
};

/// Anything that names a currency identity: assets themselves, and amounts
/// through the asset they are denominated in.
pub trait AssetLike {
    fn asset(&self) -> Asset;
}

impl AssetLike for Asset {
    fn asset(&self) -> Asset {
        self.clone()
    }
}

impl AssetLike for CurrencyAmount {
    fn asset(&self) -> Asset {
        CurrencyAmount::asset(self)
    }
}

/// Which side of a pair holds XRP, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    XrpToken,
    TokenXrp,
    TokenToken,
}

/// Two validated, distinct sides in caller order. Order carries meaning:
/// swapping `TakerGets` and `TakerPays` is a different offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPair<T = Asset> {
    first: T,
    second: T,
    kind: PairKind,
}

/// Pairs two assets (or amounts), rejecting XRP/XRP and identical tokens.
pub fn build_pair<T: AssetLike>(first: T, second: T) -> Result<AssetPair<T>, InvalidPair> {
    let kind = match (side(&first), side(&second)) {
        (Asset::Xrp, Asset::Xrp) => return Err(InvalidPair::BothXrp),
        (Asset::Xrp, Asset::Token(_)) => PairKind::XrpToken,
        (Asset::Token(_), Asset::Xrp) => PairKind::TokenXrp,
        (Asset::Token(a), Asset::Token(b)) if a == b => return Err(InvalidPair::IdenticalAssets),
        (Asset::Token(_), Asset::Token(_)) => PairKind::TokenToken,
    };

    Ok(AssetPair {
        first,
        second,
        kind,
    })
}

/// A token spelled with an XRP currency code counts as XRP.
fn side<T: AssetLike>(value: &T) -> Asset {
    match value.asset() {
        Asset::Token(token) if is_xrp_code(&token.currency) => Asset::Xrp,
        asset => asset,
    }
}

impl<T: AssetLike> AssetPair<T> {
    pub fn new(first: T, second: T) -> Result<Self, InvalidPair> {
        build_pair(first, second)
    }

    /// The currency identities of both sides, already known to be valid.
    pub fn assets(&self) -> AssetPair<Asset> {
        AssetPair {
            first: self.first.asset(),
            second: self.second.asset(),
            kind: self.kind,
        }
    }
}

impl<T> AssetPair<T> {
    pub fn first(&self) -> &T {
        &self.first
    }

    pub fn second(&self) -> &T {
        &self.second
    }

    pub fn kind(&self) -> PairKind {
        self.kind
    }

    pub fn into_parts(self) -> (T, T) {
        (self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::asset::IssuedAsset;

    fn usd(issuer: &str) -> Asset {
        Asset::token("USD", issuer).unwrap()
    }

    #[test]
    fn both_xrp_is_rejected() {
        assert_eq!(build_pair(Asset::Xrp, Asset::Xrp), Err(InvalidPair::BothXrp));
    }

    #[test]
    fn identical_tokens_are_rejected() {
        assert_eq!(
            build_pair(usd("rA"), usd("rA")),
            Err(InvalidPair::IdenticalAssets)
        );
    }

    #[test]
    fn order_is_preserved() {
        let pair = build_pair(Asset::Xrp, usd("rA")).unwrap();
        assert_eq!(pair.first(), &Asset::Xrp);
        assert_eq!(pair.second(), &usd("rA"));
        assert_eq!(pair.kind(), PairKind::XrpToken);

        let flipped = build_pair(usd("rA"), Asset::Xrp).unwrap();
        assert_eq!(flipped.kind(), PairKind::TokenXrp);
    }

    #[test]
    fn same_currency_different_issuer_is_a_pair() {
        let pair = build_pair(usd("rA"), usd("rB")).unwrap();
        assert_eq!(pair.kind(), PairKind::TokenToken);
    }

    #[test]
    fn hex_xrp_cannot_make_an_xrp_pair() {
        for code in [
            "0000000000000000000000000000000000000000",
            "0000000000000000000000005852500000000000",
        ] {
            assert!(Asset::token(code, "rA").is_err());

            let disguised = Asset::Token(IssuedAsset {
                currency: code.into(),
                issuer: "rA".into(),
            });
            assert_eq!(
                build_pair(Asset::Xrp, disguised.clone()),
                Err(InvalidPair::BothXrp)
            );
            assert_eq!(
                build_pair(disguised, Asset::Xrp),
                Err(InvalidPair::BothXrp)
            );
        }
    }

    #[test]
    fn amounts_pair_by_their_assets() {
        let xrp = CurrencyAmount::xrp_drops(1);
        let more_xrp = CurrencyAmount::xrp_drops(2);
        assert_eq!(build_pair(xrp.clone(), more_xrp), Err(InvalidPair::BothXrp));

        let a = CurrencyAmount::token("USD", "rA", "1").unwrap();
        let b = CurrencyAmount::token("USD", "rA", "2").unwrap();
        assert_eq!(build_pair(a.clone(), b), Err(InvalidPair::IdenticalAssets));

        let pair = build_pair(a, xrp).unwrap();
        assert_eq!(pair.kind(), PairKind::TokenXrp);
        assert_eq!(pair.assets().second(), &Asset::Xrp);
    }
}
