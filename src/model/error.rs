use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandError {
    /// 和了形の枚数が13枚または14枚ではない (槓子は3枚として数える)
    InvalidTileCount(usize),
    /// 牌表記のパースエラー
    InvalidTileToken(String),
    /// 副露または暗槓として不正な面子
    InvalidMeld(String),
    /// 同じ牌が5枚以上存在する
    TooManyCopies(Tile),
    /// 上がり牌が手牌に存在しない
    MissingWinTile(Tile),
    /// 面子と雀頭に分解できない
    NoValidDecomposition,
    /// 和了形だが役がない
    NoApplicableYaku,
    DuplicateRiichi,
    IppatsuWithoutRiichi,
    ChankanTsumo,
    RinshanWithoutTsumo,
    RinshanWithoutKan,
    HaiteiRon,
    HouteiTsumo,
    RinshanIppatsu,
    DoubleRiichiHaiteiIppatsu,
    /// 風牌として不正な自風・場風
    InvalidWind(Tnum),
    NoHan,
    NoFu,
}

impl fmt::Display for HandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTileCount(n) => write!(f, "invalid tile count: {} (expected 13 or 14)", n),
            Self::InvalidTileToken(s) => write!(f, "invalid tile token: '{}'", s),
            Self::InvalidMeld(s) => write!(f, "invalid meld: '{}'", s),
            Self::TooManyCopies(t) => write!(f, "more than {} copies of {}", TILE, t),
            Self::MissingWinTile(t) => write!(f, "winning tile {} is not in the hand", t),
            Self::NoValidDecomposition => write!(f, "not a winning hand"),
            Self::NoApplicableYaku => write!(f, "valid shape but no yaku"),
            Self::DuplicateRiichi => write!(f, "cannot riichi and double riichi simultaneously"),
            Self::IppatsuWithoutRiichi => write!(f, "cannot ippatsu without riichi"),
            Self::ChankanTsumo => write!(f, "cannot tsumo and chankan"),
            Self::RinshanWithoutTsumo => write!(f, "cannot rinshan without tsumo"),
            Self::RinshanWithoutKan => write!(f, "cannot rinshan without kan"),
            Self::HaiteiRon => write!(f, "cannot haitei on ron"),
            Self::HouteiTsumo => write!(f, "cannot houtei on tsumo"),
            Self::RinshanIppatsu => write!(f, "cannot rinshan and ippatsu"),
            Self::DoubleRiichiHaiteiIppatsu => {
                write!(f, "cannot double riichi, ippatsu and haitei")
            }
            Self::InvalidWind(n) => write!(f, "invalid wind: {}", n),
            Self::NoHan => write!(f, "no han provided"),
            Self::NoFu => write!(f, "no fu provided"),
        }
    }
}

impl std::error::Error for HandError {}

pub type HandResult<T> = Result<T, HandError>;
