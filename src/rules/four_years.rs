//! 4 岁班规则表
//!
//! 标签可信，没有专用排版策略（对半分栏），只有缩写表

use super::SummaryTable;
use phf::phf_map;

pub static SUMMARIES: SummaryTable = phf_map! {
    "Realiza acciones y juegos de manera autónoma, como correr, saltar, trepar, rodar, deslizarse"
        => "Corre, salta, trepa y rueda con autonomía",
    "Expresa sus necesidades, emociones, intereses y da cuenta de algunas experiencias al interactuar con personas de su entorno familiar, escolar o local"
        => "Expresa necesidades y experiencias",
    "Establece relaciones entre los objetos de su entorno según sus características perceptuales al comparar y agrupar aquellos objetos similares"
        => "Compara y agrupa objetos similares",
};
