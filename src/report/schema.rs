//! Fixed survey schema.
//!
//! The source CSV carries the exact question text of the Brazilian market
//! research form as its header row. These constants are the only place the
//! question strings live; every lookup goes through the dataset's validated
//! column accessor, so a renamed question surfaces as a `SchemaError` for
//! the affected section instead of a silent empty chart.
//!
//! Note the stray space in the age-band question: it is inside the header
//! text, so header trimming does not remove it.

/// Default survey file name, as exported by the forms tool.
pub const DEFAULT_SURVEY_FILE: &str =
    "Pesquisa de Mercado - Preferências de Compra E-commerce X Loja Física .csv";

pub const AGE_BAND: &str = "Qual a sua faixa etária ?";
pub const GENDER: &str = "Gênero";
pub const PURCHASE_FREQUENCY: &str = "Com que frequência você realiza compras?";
pub const PRIMARY_CHANNEL: &str = "Onde você realiza a maioria das suas compras atualmente?";
pub const ONLINE_MOTIVE: &str = "Qual o principal motivo para preferir comprar online?";
pub const STORE_MOTIVE: &str = "Qual o principal motivo para preferir comprar em loja física?";
pub const ONLINE_TRUST: &str = "Em uma escala de 1 a 5, o quanto você confia nas compras online?";
pub const STORE_EXPERIENCE: &str =
    "Em uma escala de 1 a 5, como você avalia sua experiência média ao comprar em loja física?";
pub const ONLINE_PRODUCTS: &str = "Quais tipos de produto você costuma comprar online?";
pub const STORE_PRODUCTS: &str = "Quais tipos de produto você costuma comprar em loja física?";
pub const ABANDONMENT: &str = "Você já desistiu de comprar em algum canal (online ou físico)?";

/// Canonical age-band display order for the channel cross-tab, youngest
/// first. First-seen order would follow response order instead.
pub const AGE_BAND_ORDER: [&str; 5] =
    ["18 a 24 anos", "25 a 34 anos", "35 a 44 anos", "45 a 54 anos", "55 anos ou mais"];
