//! 托班（cuna）规则表
//!
//! 托班的标签只写 "cuna"，没有领域信息，所以按白名单分类。
//! caminantes（会走路的阶段）的指标与前两个阶段差别很大，单独一张表。

use super::SummaryTable;
use crate::models::Destination;
use crate::services::classifier::AllowListBucket;
use crate::services::paginator::{LayoutPolicy, PlacementRule};
use phf::phf_map;

/// lactantes / gateadores 以及未指定阶段时使用
pub static ALLOW_LIST: &[AllowListBucket] = &[
    AllowListBucket {
        label: "Personal Social",
        entries: &[
            "Reconoce a las personas cercanas de su entorno",
            "Se calma con la presencia de un adulto significativo",
            "Expresa sus emociones con gestos y sonidos",
            "Participa en el momento de la alimentación",
            "Colabora en el momento del aseo y cambio de pañal",
        ],
    },
    AllowListBucket {
        label: "Psicomotriz",
        entries: &[
            "Sostiene la cabeza cuando está boca abajo",
            "Gira de boca arriba a boca abajo",
            "Se sienta sin apoyo",
            "Gatea explorando el espacio",
            "Se pone de pie con apoyo",
            "Toma objetos con toda la mano",
        ],
    },
    AllowListBucket {
        label: "Comunicación",
        entries: &[
            "Balbucea y emite sonidos para comunicarse",
            "Responde cuando lo llaman por su nombre",
            "Imita gestos y sonidos de los adultos",
            "Disfruta de canciones y rimas",
            "Señala objetos que desea",
        ],
    },
    AllowListBucket {
        label: "Descubrimiento del Mundo",
        entries: &[
            "Busca objetos que se esconden frente a él",
            "Explora objetos con la boca y las manos",
            "Reconoce objetos familiares",
            "Encaja y apila objetos",
            "Observa con atención los seres vivos de su entorno",
        ],
    },
];

pub static WALKERS_ALLOW_LIST: &[AllowListBucket] = &[
    AllowListBucket {
        label: "Personal Social",
        entries: &[
            "Se reconoce en el espejo y en fotografías",
            "Dice su nombre cuando se le pregunta",
            "Come solo con cuchara",
            "Avisa cuando quiere ir al baño",
            "Juega al lado de otros niños",
            "Expresa sus emociones con palabras y gestos",
        ],
    },
    AllowListBucket {
        label: "Psicomotriz",
        entries: &[
            "Camina con seguridad",
            "Sube y baja escaleras con apoyo",
            "Corre sin caerse",
            "Patea la pelota",
            "Realiza trazos libres con crayones",
            "Ensarta cuentas grandes",
        ],
    },
    AllowListBucket {
        label: "Comunicación",
        entries: &[
            "Nombra objetos y personas de su entorno",
            "Combina dos palabras para comunicarse",
            "Sigue indicaciones sencillas",
            "Escucha cuentos cortos con atención",
            "Canta canciones sencillas",
        ],
    },
    AllowListBucket {
        label: "Descubrimiento del Mundo",
        entries: &[
            "Agrupa objetos por color",
            "Arma rompecabezas de dos o tres piezas",
            "Explora objetos y materiales de su entorno",
            "Reconoce animales por su sonido",
            "Identifica partes de su cuerpo",
        ],
    },
];

pub static SUMMARIES: SummaryTable = phf_map! {
    "Colabora en el momento del aseo y cambio de pañal" => "Colabora en el aseo",
    "Observa con atención los seres vivos de su entorno" => "Observa seres vivos",
    "Se calma con la presencia de un adulto significativo" => "Se calma con un adulto cercano",
};

pub static WALKERS_SUMMARIES: SummaryTable = phf_map! {
    "Arma rompecabezas de dos o tres piezas" => "Arma rompecabezas simples",
    "Explora objetos y materiales de su entorno" => "Explora materiales",
};

pub fn layout() -> LayoutPolicy {
    use Destination::{Left, Right};

    LayoutPolicy::new(vec![
        PlacementRule::whole("Personal Social", Left),
        PlacementRule::whole("Psicomotriz", Left),
        PlacementRule::whole("Comunicación", Right),
        PlacementRule::whole("Descubrimiento del Mundo", Right),
    ])
}
